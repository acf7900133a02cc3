
use std::env;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::process::exit;

use failure::Fail;
use flexi_logger::Logger;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use gif_encoder::{Document, Frame, Rgb};

mod errors;

use crate::errors::{AppError, AppResult};



#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct EntryParameter {
    delay: Option<u32>,
    transparent: Option<Rgb>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Entry {
    filepath: String,
    parameter: EntryParameter,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Setting {
    comment: Option<String>,
    entries: Vec<Entry>,
    plays: Option<u16>,
    quality: Option<u32>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Parsed {
    output: Option<String>,
    setting: Setting,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Image {
    data: Vec<u8>,
    height: u32,
    width: u32,
}


fn main() {
    let _logger = match Logger::try_with_env_or_str("warn").and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to initialize logger: {}", err);
            None
        }
    };

    if let Err(err) = app() {
        let mut fail: &dyn Fail = &err;
        let mut message = err.to_string();
        while let Some(cause) = fail.cause() {
            message.push_str(&format!("\n\tcaused by: {}", cause));
            fail = cause;
        }
        eprintln!("{}\n", message);
        print_usage();
        exit(1);
    }
}

fn print_usage() {
    eprintln!(include_str!("usage.txt"));
}

fn app() -> AppResult<()> {
    let parsed = parse_args()?;
    let bytes = compile(&parsed.setting)?;

    if let Some(output) = parsed.output {
        info!("Writing {} bytes to {}", bytes.len(), output);
        let mut file = OpenOptions::new().write(true).create(true).truncate(true).open(output)?;
        file.write_all(&bytes)?;
    } else {
        let out = stdout();
        let mut out = BufWriter::new(out.lock());
        out.write_all(&bytes)?;
        out.flush()?;
    }

    Ok(())
}


fn compile(setting: &Setting) -> AppResult<Vec<u8>> {
    let first = setting.entries.first().ok_or(AppError::NotEnoughArgument)?;

    let progress_bar = ProgressBar::new(setting.entries.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:60.cyan/blue}] {pos:>4}/{len:4} files processed ({eta} remaining) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▌ ")
    );

    let image = load_image(&first.filepath)?;
    let mut document = Document::new(image.width, image.height);
    document.loop_count = setting.plays;
    document.comment = setting.comment.clone();
    if let Some(quality) = setting.quality {
        document.set_quality(quality);
    }
    debug!("Canvas {}x{} from {}", image.width, image.height, first.filepath);

    progress_bar.set_message(file_name(&first.filepath));
    document.add_frame(make_frame(&first.parameter, image.data));
    progress_bar.inc(1);

    for entry in setting.entries.iter().skip(1) {
        progress_bar.set_message(file_name(&entry.filepath));
        let image = load_image(&entry.filepath)?;
        if image.width != document.width || image.height != document.height {
            return Err(AppError::InconsistentSize(entry.filepath.clone()));
        }
        document.add_frame(make_frame(&entry.parameter, image.data));
        progress_bar.inc(1);
    }

    let bytes = gif_encoder::encode(&document)?;
    progress_bar.finish_and_clear();

    Ok(bytes)
}


fn parse_args() -> AppResult<Parsed> {
    parse(env::args().skip(1))
}

fn parse<T: Iterator<Item = String>>(mut args: T) -> AppResult<Parsed> {
    let mut setting = Setting::default();
    let mut output = None;
    let mut parameter = EntryParameter::default();

    #[allow(clippy::while_let_on_iterator)]
    while let Some(arg) = args.next() {
        let mut next = || args.next().ok_or(AppError::NotEnoughArgument);

        match &*arg {
            "-h" | "--help" => {
                print_usage();
                exit(0);
            },
            "-d" | "--delay" =>
                parameter.delay = Some(next()?.parse()?),
            "-t" | "--transparent" =>
                parameter.transparent = Some(parse_color(&next()?)?),
            "-p" | "--plays" =>
                setting.plays = Some(next()?.parse()?),
            "-q" | "--quality" =>
                setting.quality = Some(next()?.parse()?),
            "-c" | "--comment" =>
                setting.comment = Some(next()?),
            "-o" | "--output" =>
                output = Some(next()?),
            filepath => {
                let entry = Entry {
                    filepath: filepath.to_owned(),
                    parameter,
                };
                setting.entries.push(entry);
            }
        }
    }

    Ok(Parsed { setting, output })
}


fn parse_color(s: &str) -> AppResult<Rgb> {
    let s = s.trim_start_matches('#');
    Ok(Rgb::from_u32(u32::from_str_radix(s, 16)?))
}


fn load_image(filepath: &str) -> AppResult<Image> {
    let image = image::open(filepath)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(Image { width, height, data: image.into_raw() })
}

fn file_name(filepath: &str) -> String {
    Path::new(filepath)
        .file_name()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_else(|| filepath.to_owned())
}


fn make_frame(param: &EntryParameter, pixels: Vec<u8>) -> Frame {
    Frame {
        delay: param.delay,
        transparent: param.transparent,
        ..Frame::new(pixels)
    }
}
