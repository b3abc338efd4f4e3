use cbindgen::Config;
use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/c_sequence.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    // 获取目标目录（根据构建模式，可能是 target/debug 或 target/release）
    let target_dir =
        PathBuf::from(env::var("CARGO_TARGET_DIR").unwrap_or_else(|_| "target".into()));
    let out_dir = if cfg!(debug_assertions) {
        target_dir.join("debug")
    } else {
        target_dir.join("release")
    };

    // 获取当前 crate 的根目录
    let crate_dir =
        env::var("CARGO_MANIFEST_DIR").expect("Could not find Cargo manifest directory");

    // 加载配置文件
    let config = match Config::from_file(PathBuf::from(&crate_dir).join("cbindgen.toml")) {
        Ok(cfg) => cfg,
        Err(e) => panic!("Unable to load cbindgen.toml configuration: {:?}", e),
    };

    // 头文件生成失败只给出警告，不阻断 Rust 侧的构建
    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            let header = PathBuf::from(&crate_dir).join(&out_dir).join("link_sequence.h");
            if let Some(parent) = header.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    println!("cargo:warning=Unable to create {}: {}", parent.display(), e);
                    return;
                }
            }
            bindings.write_to_file(&header);
        }
        Err(e) => {
            println!("cargo:warning=Failed to generate C header: {:?}", e);
        }
    }
}
