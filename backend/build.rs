use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new()
                .overwrite(true)
                .content_only(true),
        )
        .unwrap();
    } else if !out_dir.exists() {
        // Keep include_dir! satisfied when the frontend has not been built.
        fs::create_dir_all(out_dir).unwrap();
        fs::write(
            out_dir.join("index.html"),
            "<!doctype html><html><body>Compile o frontend com trunk build.</body></html>\n",
        )
        .unwrap();
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
