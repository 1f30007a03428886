use std::time::Duration;

use spiral::toplevel::config::Config;
use spiral::toplevel::config::Layout;
use spiral::toplevel::error::Error;

fn write_config(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("spiral-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_partial_file() {
    let path = write_config(
        "partial",
        r##"
[spiral]
t = 0.25
delay = "20ms"

[style]
color = "#00ff00"
"##,
    );
    let config = Config::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.spiral.t, 0.25);
    assert_eq!(config.spiral.square_number, 50);
    assert_eq!(config.spiral.delay, Duration::from_millis(20));
    assert_eq!(config.spiral.factors(), [0.75, 0.25, 0.25, 0.75]);
    assert_eq!(config.style.color, "#00ff00");
    assert_eq!(config.style.canvas_divisor, 2.2);
    assert_eq!(config.window.hint, "click anywhere to draw");
}

#[test]
fn test_load_rejects_zero_squares() {
    let path = write_config("zero", "[spiral]\nsquare_number = 0\n");
    let result = Config::load(Some(&path));
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("spiral-does-not-exist.toml");
    assert!(matches!(Config::load(Some(&path)), Err(Error::Io(_))));
}

#[test]
fn test_default_layout_for_full_hd() {
    let config = Config::load(None).unwrap();
    let layout = Layout::from_viewport(1920.0, 1080.0, &config.style);
    assert_eq!(layout.canvas_size, 490);
    assert_eq!(layout.line_width, 4.0);
}
