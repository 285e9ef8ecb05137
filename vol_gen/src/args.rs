//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn can_fit_u8(num: &str) -> Result<(), String> {
    match num.parse::<u8>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <0;255>".into()),
    }
}

pub fn is_seed(num: &str) -> Result<(), String> {
    match num.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Seed must be an unsigned number".into()),
    }
}

pub const GENERATOR_NAMES: &[&str] = &["solid", "sphere", "ramp", "noise"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("vol_gen")
        .version("0.1.0")
        .about("Synthetic volume generator for tf_app")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("sample")
                .help("Value of solid and sphere samples")
                .long("sample")
                .value_name("BYTE")
                .default_value("255")
                .validator(can_fit_u8),
        )
        .arg(
            Arg::new("cell")
                .help("Distance of noise lattice points, in samples")
                .long("cell")
                .value_name("SIDE")
                .default_value("8")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_seed),
        )
        .arg(
            Arg::new("header")
                .help("Prepend TFVOL header with dimensions")
                .long("header"),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.vol")),
        )
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn validators() {
        assert!(is_positive_number("12").is_ok());
        assert!(is_positive_number("0").is_err());
        assert!(is_positive_number("x").is_err());
        assert!(can_fit_u8("255").is_ok());
        assert!(can_fit_u8("256").is_err());
        assert!(is_seed("0").is_ok());
    }

    #[test]
    fn command_is_valid() {
        get_command().debug_assert();
    }

    #[test]
    fn dims_required() {
        let res = get_command().try_get_matches_from(["vol_gen", "-g", "solid"]);
        assert!(res.is_err());
    }
}
