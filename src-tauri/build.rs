fn main() {
    // Tauri-generated build configuration (must be called first).
    tauri_build::build();

    println!("cargo:rerun-if-changed=templates/invoice.html");
    println!("cargo:rerun-if-changed=config/default.toml");
}
