use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Place the workspace `config.toml` beside the backend binary
///
/// Every failure is reported as a cargo warning; the binary then falls back
/// to its embedded default configuration.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    if let Err(message) = copy_config() {
        println!("cargo:warning={}, the embedded default config will be used", message);
    }
}

fn copy_config() -> Result<(), String> {
    let out_dir = env::var("OUT_DIR").map_err(|e| format!("OUT_DIR unavailable: {}", e))?;
    let profile = env::var("PROFILE").map_err(|e| format!("PROFILE unavailable: {}", e))?;

    // target/<profile>/build/backend-<hash>/out -> target/<profile>
    let binary_dir = Path::new(&out_dir)
        .ancestors()
        .find(|dir| dir.ends_with(&profile))
        .ok_or_else(|| format!("no '{}' directory above {}", profile, out_dir))?;

    let source = workspace_root()?.join("config.toml");
    if !source.exists() {
        return Err(format!("{} not found", source.display()));
    }

    let destination = binary_dir.join("config.toml");
    fs::copy(&source, &destination)
        .map(|_| ())
        .map_err(|e| format!("copying {} to {} failed: {}", source.display(), destination.display(), e))
}

fn workspace_root() -> Result<PathBuf, String> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .ok_or_else(|| "workspace root not found".to_string())
}
