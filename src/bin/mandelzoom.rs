// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate mandelzoom;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::info;
use mandelzoom::{Fractal, Mandelbrot, RenderConfig, RenderMode, ViewportSnapshot, ZoomGesture};
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A gesture on the command line is `x,y,delta`.
fn parse_triple(s: &str) -> Option<(f64, f64, f64)> {
    let mut parts = s.split(',').map(f64::from_str);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(delta)), None) => Some((x, y, delta)),
        _ => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const EXTENT: &str = "extent";
const DEPTH: &str = "depth";
const ZOOM: &str = "zoom";
const SEQUENTIAL: &str = "sequential";
const MULTIPLIER: &str = "multiplier";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.75,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center"))
                .help("Center of the view on the complex plane"),
        )
        .arg(
            Arg::with_name(EXTENT)
                .required(false)
                .long(EXTENT)
                .short("e")
                .takes_value(true)
                .default_value("1.5,1.2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse extent"))
                .help("Half-width and half-height of the view"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .required(false)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .default_value("500")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse depth",
                        "Depth must be between 1 and 100000",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .allow_hyphen_values(true)
                .validator(|s| match parse_triple(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse zoom gesture".to_string()),
                })
                .help("Scroll gesture x,y,delta in output pixels; negative delta zooms in"),
        )
        .arg(
            Arg::with_name(SEQUENTIAL)
                .long(SEQUENTIAL)
                .help("Render on a single thread"),
        )
        .arg(
            Arg::with_name(MULTIPLIER)
                .required(false)
                .long(MULTIPLIER)
                .short("m")
                .takes_value(true)
                .default_value("3")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        16,
                        "Could not parse worker multiplier",
                        "Worker multiplier must be between 1 and 16",
                    )
                })
                .help("Workers per CPU on the parallel path"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for {}", name))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height): (u16, u16) =
        parse_pair(value(matches, SIZE)?, 'x').ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let center: (f64, f64) =
        parse_pair(value(matches, CENTER)?, ',').ok_or_else(|| format_err!("Error parsing center"))?;
    let extent: (f64, f64) =
        parse_pair(value(matches, EXTENT)?, ',').ok_or_else(|| format_err!("Error parsing extent"))?;
    let depth = usize::from_str(value(matches, DEPTH)?)?;
    let multiplier = usize::from_str(value(matches, MULTIPLIER)?)?;

    let view = ViewportSnapshot::default()
        .with_center(center.0, center.1)
        .with_extent(extent.0, extent.1)
        .with_depth(depth);
    let config = RenderConfig {
        mode: if matches.is_present(SEQUENTIAL) {
            RenderMode::Sequential
        } else {
            RenderMode::Parallel
        },
        worker_multiplier: multiplier,
    };
    let mut set = Mandelbrot::with_view(view, config);

    for gesture in matches.values_of(ZOOM).into_iter().flatten() {
        let (x, y, delta) = parse_triple(gesture).ok_or_else(|| format_err!("Error parsing zoom {}", gesture))?;
        set.zoom(&ZoomGesture::new(f64::from(width), f64::from(height), x, y, delta));
    }

    let output = value(matches, OUTPUT)?;
    let v = *set.view();
    info!(
        "{}: center ({}, {}), extent {}x{}, magnification {}",
        set.name(),
        v.center_x,
        v.center_y,
        v.half_width,
        v.half_height,
        v.magnification
    );
    set.render(u32::from(width), u32::from(height)).save(output)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
