//! End-to-end encoding of real SVG/PNG files through the public API.

use base64::{Engine, engine::general_purpose::STANDARD};
use iconsass::config::{self, EncodingOptions, PngOptions};
use iconsass::directory::{DirectoryEncoder, DirectoryError};
use iconsass::encoding::svg::svg_data_uri;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_svg(dir: &Path, name: &str, size: u32) -> PathBuf {
    let path = dir.join(format!("{name}.svg"));
    let source = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\">\n\
         \t<circle cx=\"{r}\" cy=\"{r}\" r=\"{r}\"/>\n\
         </svg>\n",
        r = size / 2
    );
    fs::write(&path, source).unwrap();
    path
}

fn write_png(dir: &Path, name: &str, size: u32) -> PathBuf {
    let path = dir.join(format!("{name}.png"));
    image::RgbaImage::from_pixel(size, size, image::Rgba([200, 40, 40, 255]))
        .save(&path)
        .unwrap();
    path
}

fn png_uri(path: &Path) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(fs::read(path).unwrap()))
}

fn branches(css: &str, name: &str) -> usize {
    css.matches(&format!("@if $icon == \"{name}\" {{")).count()
}

#[test]
fn svg_and_png_pairs_without_classes() {
    let tmp = TempDir::new().unwrap();
    let icons = tmp.path().join("icons");
    fs::create_dir(&icons).unwrap();
    let home_svg = write_svg(&icons, "home", 20);
    let home_png = write_png(&icons, "home", 20);
    write_svg(&icons, "settings", 24);
    let settings_png = write_png(&icons, "settings", 24);

    let output = tmp.path().join("dist/icons.scss");
    let encoder = DirectoryEncoder::new(
        &icons,
        &output,
        PngOptions::default(),
        EncodingOptions::default(),
        &icons,
        false,
    );
    let report = encoder.encode().unwrap();
    let css = fs::read_to_string(&output).unwrap();

    assert!(css.starts_with(
        "@mixin grunticon($icon, $position: top left, $dimensions: false) {\n\n"
    ));
    assert_eq!(css.matches("@mixin").count(), 1);
    assert_eq!(branches(&css, "home"), 1);
    assert_eq!(branches(&css, "settings"), 1);
    assert!(!css.contains(":before"));

    let home_svg_uri = svg_data_uri(&fs::read_to_string(&home_svg).unwrap());
    assert!(css.contains(&format!("background-image: url('{home_svg_uri}');")));
    assert!(css.contains(&format!("background-image: url('{}');", png_uri(&home_png))));
    assert!(css.contains(&format!("background-image: url('{}');", png_uri(&settings_png))));
    assert!(css.contains("background-image: url('/home.png');"));
    assert!(css.contains("\t\t\theight:24px;\n\t\t\twidth:24px;\n"));

    assert_eq!(report.mixin_branches, 2);
    assert_eq!(report.skipped_duplicates, vec!["home", "settings"]);
}

#[test]
fn png_inputs_with_companion_svgs_and_classes() {
    let tmp = TempDir::new().unwrap();
    let icons = tmp.path().join("png");
    let svgs = tmp.path().join("svg");
    fs::create_dir(&icons).unwrap();
    fs::create_dir(&svgs).unwrap();
    for (name, size) in [("alert", 16), ("star", 32)] {
        write_png(&icons, name, size);
        write_svg(&svgs, name, size);
    }

    let mut options = EncodingOptions {
        prefix: ".icon-".into(),
        pngpath: Some("/img/icons".into()),
        ..EncodingOptions::default()
    };
    options
        .customselectors
        .insert("*".into(), vec![".parent .icon-NAME".into()]);

    let output = tmp.path().join("icons.scss");
    let encoder =
        DirectoryEncoder::new(&icons, &output, PngOptions::default(), options, &svgs, true);
    encoder.encode().unwrap();
    let first = fs::read_to_string(&output).unwrap();
    encoder.encode().unwrap();
    let css = fs::read_to_string(&output).unwrap();

    assert_eq!(first, css, "second run must be byte-identical");
    assert_eq!(css.matches(".icon-star:before{").count(), 1);
    assert_eq!(css.matches(".icon-alert:before{").count(), 1);
    assert_eq!(css.matches(".parent .icon-star,\n").count(), 1);
    assert!(css.contains("\theight:32px;\n\twidth:32px;\n"));
    assert!(css.contains("url('/img/icons/alert.png')"));
}

#[test]
fn duplicate_name_with_classes_fails_after_mixin() {
    let tmp = TempDir::new().unwrap();
    write_svg(tmp.path(), "icon", 10);
    write_png(tmp.path(), "icon", 10);
    let output = tmp.path().join("out/icons.scss");

    let encoder = DirectoryEncoder::new(
        tmp.path(),
        &output,
        PngOptions::default(),
        EncodingOptions::default(),
        tmp.path(),
        true,
    );
    let err = encoder.encode().unwrap_err();
    assert!(matches!(err, DirectoryError::DuplicateName(ref n) if n == "icon"));

    let css = fs::read_to_string(&output).unwrap();
    assert_eq!(branches(&css, "icon"), 1);
    assert!(css.ends_with("}\n"));
    assert!(!css.contains(".i--icon:before"));
}

#[test]
fn malformed_png_aborts_with_encoder_error() {
    let tmp = TempDir::new().unwrap();
    let icons = tmp.path().join("icons");
    fs::create_dir(&icons).unwrap();
    write_svg(&icons, "broken", 8);
    fs::write(icons.join("broken.png"), b"definitely not a png").unwrap();
    let options = EncodingOptions {
        mixin_duplicates: config::DuplicatePolicy::Allow,
        ..EncodingOptions::default()
    };

    let encoder = DirectoryEncoder::new(
        &icons,
        tmp.path().join("icons.scss"),
        PngOptions::default(),
        options,
        &icons,
        false,
    );
    let err = encoder.encode().unwrap_err();
    assert!(
        matches!(err, DirectoryError::Encoder { ref path, .. } if path.ends_with("broken.png")),
        "unexpected error: {err}"
    );
}

#[test]
fn from_config_file() {
    let tmp = TempDir::new().unwrap();
    let icons = tmp.path().join("icons");
    fs::create_dir(&icons).unwrap();
    write_png(&icons, "home", 12);
    write_svg(&icons, "home", 12);
    let config_path = tmp.path().join("iconsass.toml");
    fs::write(
        &config_path,
        format!(
            "input = {input:?}\noutput = {output:?}\n\n[png]\nnoencode = true\n\n[css]\npngfolder = \"png\"\n",
            input = icons.to_string_lossy(),
            output = tmp.path().join("out.scss").to_string_lossy(),
        ),
    )
    .unwrap();

    let config = config::load_config(&config_path, None).unwrap();
    let encoder = DirectoryEncoder::from_config(&config).unwrap();
    encoder.encode().unwrap();

    let css = fs::read_to_string(tmp.path().join("out.scss")).unwrap();
    assert_eq!(branches(&css, "home"), 1);
    // noencode: the .no-svg tier references the file too
    assert!(!css.contains("data:image/png"));
    assert_eq!(css.matches("url('png/home.png')").count(), 2);
}
