use anyhow::{Context, Result};
use std::env;
use std::process::{Command, ExitStatus};
use std::string::String;

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    pub rustflags: Option<String>,
    pub demo: String,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }

    fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let arch = detect_arch();
    let nproc = detect_nproc();
    let extra = env::var("SIGKIT_FEATURES").unwrap_or_default();
    compute_config(&arch, nproc, &extra)
}

fn detect_arch() -> String {
    if let Ok(arch) = env::var("ARCH") {
        if !arch.trim().is_empty() {
            return arch;
        }
    }
    Command::new("uname")
        .arg("-m")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default()
}

fn detect_nproc() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(arch: &str, nproc: usize, extra: &str) -> BuildConfig {
    let mut features = Vec::new();

    // Benchmarks are only compared on the machine that ran them.
    let rustflags = if arch.contains("x86_64") || arch.contains("aarch64") || arch.contains("arm64")
    {
        Some("-C target-cpu=native".to_string())
    } else {
        None
    };

    if nproc > 1 {
        features.push("parallel".to_string());
    }

    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }

    let demo = if features.iter().any(|f| f == "verbose-logging") {
        "verbose_logging".to_string()
    } else {
        "basic_usage".to_string()
    };

    BuildConfig {
        features,
        rustflags,
        demo,
    }
}

fn cargo() -> Command {
    Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()))
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    cmd.arg("build");
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
    cmd
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    cmd.arg("test");
    let mut features = cfg.features.clone();
    if !cfg.has_feature("internal-tests") {
        features.push("internal-tests".to_string());
    }
    cmd.arg("--features").arg(features.join(" "));
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["clippy", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["fmt", "--all"]);
    cmd
}

pub fn demo_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    cmd.args(["run", "--example", &cfg.demo, "--release"]);
    if let Some(f) = cfg.features_arg() {
        cmd.arg("--features").arg(f);
    }
    cmd
}

/// Criterion suite in `sigkit-bench`. Only `parallel` is forwarded; the bench
/// crate exposes no other features.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo();
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    cmd.args(["bench", "-p", "sigkit-bench"]);
    if cfg.has_feature("parallel") {
        cmd.arg("--features").arg("parallel");
    }
    cmd
}

/// Run `cmd` to completion, attaching the program name to spawn failures.
pub fn run(mut cmd: Command) -> Result<ExitStatus> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    cmd.status()
        .with_context(|| format!("failed to run {}", program))
}
