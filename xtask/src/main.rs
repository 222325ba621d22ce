// Likhni - Build Task Runner
// Unified build system using cargo xtask pattern

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use xshell::{Shell, cmd};

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("build") => {
            let release = args.contains(&"--release".to_string());
            build(&sh, release)
        },
        Some("test") => test(&sh),
        Some("format") => {
            let check = args.contains(&"--check".to_string());
            format(&sh, check)
        },
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("clean") => clean(&sh),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        _ => {
            print_help();
            Ok(())
        },
    }
}

fn print_help() {
    println!("Likhni - Build Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the backend");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  run [ARGS...]       Run the server (ARGS go to likhni, e.g. --config path)");
    println!("  clean               Clean build artifacts");
    println!("  ci                  Run all CI checks (format + clippy + build + test)");
    println!("  dist                Create distribution package (tar.gz)");
    println!();
    println!("Examples:");
    println!("  cargo xtask build --release");
    println!("  cargo xtask run -- --config conf/config.toml");
    println!("  cargo xtask format --check");
}

/// Build the backend
fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🦀 Building likhni{}...", if release { " (release)" } else { "" });

    let _dir = sh.push_dir(project_root());
    if release {
        cmd!(sh, "cargo build --release -p likhni")
            .run()
            .context("Failed to build backend in release mode")?;
    } else {
        cmd!(sh, "cargo build -p likhni").run().context("Failed to build backend")?;
    }

    println!("✅ Build complete");
    Ok(())
}

/// Run all tests
fn test(sh: &Shell) -> Result<()> {
    println!("🧪 Running tests...");
    println!();

    let _dir = sh.push_dir(project_root());
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;

    println!();
    println!("✅ All tests passed!");
    Ok(())
}

/// Format code
fn format(sh: &Shell, check: bool) -> Result<()> {
    println!("🎨 Formatting Rust code...");

    let _dir = sh.push_dir(project_root());
    if check {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .context("Rust code is not formatted")?;
        println!("✅ Rust code is properly formatted");
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
        println!("✅ Rust code formatted");
    }

    Ok(())
}

/// Run clippy checks
fn clippy(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings --allow clippy::uninlined-format-args")
        .run()
        .context("Clippy checks failed")?;

    Ok(())
}

/// Run the server from the project root so conf/config.toml and .env are found
fn run(sh: &Shell, args: &[String]) -> Result<()> {
    println!("▶️  Starting likhni...");
    println!();

    let _dir = sh.push_dir(project_root());
    let args = args.iter().filter(|a| a.as_str() != "--");
    cmd!(sh, "cargo run -p likhni -- {args...}")
        .run()
        .context("Failed to run application")?;

    Ok(())
}

/// Clean build artifacts
fn clean(sh: &Shell) -> Result<()> {
    println!("🧹 Cleaning build artifacts...");

    let project = project_root();
    let _dir = sh.push_dir(&project);
    cmd!(sh, "cargo clean").run()?;

    let build_dir = project.join("build");
    if build_dir.exists() {
        sh.remove_path(&build_dir)?;
    }

    println!("✅ Clean complete!");
    Ok(())
}

/// Run all CI checks (format + clippy + build + test)
fn ci(sh: &Shell) -> Result<()> {
    println!("🔄 Running CI pipeline...");
    println!();

    println!("📝 [1/4] Checking code format...");
    format(sh, true)?;
    println!();

    println!("🔍 [2/4] Running clippy checks...");
    clippy(sh)?;
    println!("✅ Clippy checks passed");
    println!();

    println!("🔨 [3/4] Building project...");
    build(sh, true)?;
    println!();

    println!("🧪 [4/4] Running tests...");
    test(sh)?;
    println!();

    println!("🎉 CI pipeline completed successfully!");
    Ok(())
}

/// Create distribution package (tar.gz) with bin/, conf/ and logs/
fn dist(sh: &Shell) -> Result<()> {
    println!("📦 Creating distribution package...");
    println!();

    build(sh, true)?;

    let project = project_root();
    let dist_dir = project.join("build/dist");
    create_distribution(sh, &project, &dist_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let package_name = format!("likhni-{}.tar.gz", timestamp);
    let package_path = dist_dir.join(&package_name);

    println!("📋 Creating tarball: {}...", package_name);
    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf {package_name} bin conf logs")
        .run()
        .context("Failed to create tarball")?;

    println!();
    println!("✅ Distribution package created!");
    println!("   Location: {}", package_path.display());
    Ok(())
}

fn create_distribution(sh: &Shell, project: &Path, dist_dir: &Path) -> Result<()> {
    for sub in ["bin", "conf", "logs"] {
        sh.create_dir(dist_dir.join(sub))?;
    }

    sh.copy_file(project.join("target/release/likhni"), dist_dir.join("bin/likhni"))
        .context("Failed to copy binary")?;
    sh.copy_file(project.join("conf/config.toml"), dist_dir.join("conf/config.toml"))
        .context("Failed to copy config")?;

    Ok(())
}

/// Get project root directory
fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
