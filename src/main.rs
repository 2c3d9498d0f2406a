use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use image_annotate::{
    AnnotateError, Config, DEFAULT_BORDER, DEFAULT_ORIENTATION, DEFAULT_TEXT_SIZE, Stage,
};

#[derive(Parser, Debug)]
#[command(
    name = "annotate",
    version,
    about = "Put a caption on an image with ImageMagick and store it in the image metadata with exiv2"
)]
struct Cli {
    /// Text to put on the image
    #[arg(short = 't', long = "text")]
    text: String,

    /// Input image file
    #[arg(short = 'i', long = "inputfile", alias = "input-file")]
    input: PathBuf,

    /// Output image file
    #[arg(short = 'o', long = "outputfile", alias = "output-file")]
    output: PathBuf,

    /// Font size in points
    #[arg(short = 's', long = "textsize", alias = "text-size", default_value_t = DEFAULT_TEXT_SIZE)]
    text_size: u32,

    /// Distance from the border in pixels
    #[arg(short = 'b', long = "border", default_value_t = DEFAULT_BORDER)]
    border: u32,

    /// <vertical>-<horizontal>-<direction>, e.g. bottom-right-horizontal or b-r-v
    #[arg(short = 'd', long = "orientation", default_value = DEFAULT_ORIENTATION)]
    orientation: String,

    /// Font name passed to the renderer (default from settings)
    #[arg(short = 'f', long = "font")]
    font: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<PathBuf>,

    /// Show the commands being run
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    image_annotate::logging::init(cli.verbose)?;

    let mut config = Config::new(cli.text, cli.input, cli.output).with_orientation(&cli.orientation)?;
    config.text_size = cli.text_size;
    config.border = cli.border;
    config.font = cli.font;
    config.settings_path = cli.read_settings;

    match image_annotate::run(&config) {
        Ok(_) => Ok(()),
        Err(err @ AnnotateError::Collaborator { stage: Stage::Metadata, .. }) => {
            Err(err).with_context(|| {
                format!(
                    "{} was written but its metadata was not updated",
                    config.output.display()
                )
            })
        }
        Err(err) => Err(err.into()),
    }
}
