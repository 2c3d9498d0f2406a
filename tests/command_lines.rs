use std::path::Path;

use image_annotate::Settings;
use image_annotate::tools::{Exiv2, ImageMagick, LabelRequest};

#[test]
fn render_command_line() {
    let imagemagick = ImageMagick::from_settings(&Settings::default()).unwrap();
    let request = LabelRequest {
        text: "hello there",
        point_size: 50,
        font: "Liberation-Serif",
        rotated: true,
    };
    let command = imagemagick.render_command(&request, Path::new("/tmp/label.miff"));
    insta::assert_snapshot!(
        command.to_string(),
        @"convert -density 100 -pointsize 50 -background #00000099 -fill white -gravity center -font Liberation-Serif 'label: hello there' -strokewidth 8 -rotate 90 miff:/tmp/label.miff"
    );
}

#[test]
fn identify_command_line() {
    let imagemagick = ImageMagick::from_settings(&Settings::default()).unwrap();
    let command = imagemagick.identify_command(Path::new("/tmp/in.jpg"));
    insta::assert_snapshot!(command.to_string(), @r"identify -format '%w %h\n' /tmp/in.jpg");
}

#[test]
fn metadata_command_line() {
    let exiv2 = Exiv2::from_settings(&Settings::default()).unwrap();
    let command = exiv2.caption_command(Path::new("/tmp/out.jpg"), "hello there");
    insta::assert_snapshot!(
        command.to_string(),
        @r#"exiv2 '-Mset Exif.Photo.UserComment "charset=Ascii hello there"' '-Mset Iptc.Application2.Caption String "hello there"' '-Mset Xmp.dc.description "lang="x-default" hello there"' mo /tmp/out.jpg"#
    );
}

#[test]
fn imagemagick_seven_prefix() {
    let mut settings = Settings::default();
    settings.tools.identify = "magick identify".to_string();
    let imagemagick = ImageMagick::from_settings(&settings).unwrap();
    let command = imagemagick.identify_command(Path::new("in.png"));
    insta::assert_snapshot!(command.to_string(), @r"magick identify -format '%w %h\n' in.png");
}
