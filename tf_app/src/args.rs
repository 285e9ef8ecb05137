//! Command line of the headless editor session

use std::ffi::OsStr;

use clap::{Arg, ArgMatches, Command, ValueHint};

use crate::app::ScriptStep;

fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<usize>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

fn is_drag(s: &str) -> Result<(), String> {
    ScriptStep::parse_drag(s)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn is_recolor(s: &str) -> Result<(), String> {
    ScriptStep::parse_recolor(s)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn is_dismiss(s: &str) -> Result<(), String> {
    ScriptStep::parse_dismiss(s)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("tf_app")
        .version("0.1.0")
        .about("Edit a transfer function and render a volume through it")
        .arg(
            Arg::new("config")
                .help("Configuration file, config/default.toml when present")
                .long("config")
                .short('c')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("volume")
                .help("Volume file, a sphere is generated when missing")
                .long("volume")
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("dims")
                .help("Dimensions of a raw volume")
                .long("dims")
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("format")
                .help("Layout of the volume file")
                .long("format")
                .value_name("FORMAT")
                .possible_values(["raw", "header"]),
        )
        .arg(
            Arg::new("palette")
                .help("Palette to start the editor with")
                .long("palette")
                .short('p')
                .value_name("NAME"),
        )
        .arg(
            Arg::new("drag")
                .help("Drag stop to offset, runs before recolors")
                .long("drag")
                .value_name("INDEX=OFFSET")
                .multiple_occurrences(true)
                .validator(is_drag),
        )
        .arg(
            Arg::new("recolor")
                .help("Click stop and pick a color")
                .long("recolor")
                .value_name("INDEX=COLOR")
                .multiple_occurrences(true)
                .validator(is_recolor),
        )
        .arg(
            Arg::new("dismiss")
                .help("Click stop and close the color dialog")
                .long("dismiss")
                .value_name("INDEX")
                .multiple_occurrences(true)
                .validator(is_dismiss),
        )
        .arg(
            Arg::new("frames")
                .help("Number of frames to render")
                .long("frames")
                .short('n')
                .value_name("N")
                .default_value("1")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("single-thread")
                .help("Render on the calling thread")
                .long("single-thread"),
        )
        .arg(
            Arg::new("output")
                .help("Frame image")
                .long("output")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("frame.png")),
        )
        .arg(
            Arg::new("lookup-output")
                .help("Lookup strip image")
                .long("lookup-output")
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
}

/// Editor steps in the order they run: drags, recolors, dismissals
pub fn script_steps(args: &ArgMatches) -> anyhow::Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (key, parse) in [
        ("drag", ScriptStep::parse_drag as fn(&str) -> anyhow::Result<ScriptStep>),
        ("recolor", ScriptStep::parse_recolor),
        ("dismiss", ScriptStep::parse_dismiss),
    ] {
        if let Some(values) = args.values_of(key) {
            for value in values {
                steps.push(parse(value)?);
            }
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn command_is_valid() {
        get_command().debug_assert();
    }

    #[test]
    fn defaults() {
        let matches = get_command().try_get_matches_from(["tf_app"]).unwrap();
        assert_eq!(matches.value_of("frames"), Some("1"));
        assert_eq!(matches.value_of_os("output"), Some(OsStr::new("frame.png")));
        assert!(!matches.is_present("single-thread"));
        assert!(script_steps(&matches).unwrap().is_empty());
    }

    #[test]
    fn steps_in_order() {
        let matches = get_command()
            .try_get_matches_from([
                "tf_app",
                "--recolor",
                "0=#ff0000",
                "--drag",
                "2=0.9",
                "--dismiss",
                "1",
                "--drag",
                "1=0.1",
            ])
            .unwrap();

        let steps = script_steps(&matches).unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Drag {
                    stop: 2,
                    offset: 0.9
                },
                ScriptStep::Drag {
                    stop: 1,
                    offset: 0.1
                },
                ScriptStep::Recolor {
                    stop: 0,
                    color: "#ff0000".to_owned()
                },
                ScriptStep::Dismiss { stop: 1 },
            ]
        );
    }

    #[test]
    fn invalid_values() {
        assert!(get_command()
            .try_get_matches_from(["tf_app", "--drag", "2"])
            .is_err());
        assert!(get_command()
            .try_get_matches_from(["tf_app", "--frames", "0"])
            .is_err());
        assert!(get_command()
            .try_get_matches_from(["tf_app", "--format", "nrrd"])
            .is_err());
        assert!(get_command()
            .try_get_matches_from(["tf_app", "--dims=4,4"])
            .is_err());
    }
}
