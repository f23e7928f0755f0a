/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::str::FromStr;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Input events delivered to the simulation driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    HallCall(i32),
    CabCall(i32),
    SetEnter { floor: u8, count: u32 },
    SetExit { floor: u8, count: u32 },
    Resize(f64),
    Status,
    Quit,
    QuitWhenSettled,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Parses one console line.
 *
 * - `call <floor>`         hall call button
 * - `car <floor>`          cab button
 * - `in <floor> <count>`   passengers waiting to board at a floor
 * - `out <floor> <count>`  passengers leaving at a floor
 * - `resize <height>`      new shaft height
 * - `status`               print the current state
 * - `quit`                 stop immediately
 */
impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match keyword.to_ascii_lowercase().as_str() {
            "call" => Ok(Command::HallCall(single_arg(&args, "call <floor>")?)),
            "car" => Ok(Command::CabCall(single_arg(&args, "car <floor>")?)),
            "in" => {
                let (floor, count) = pair_args(&args, "in <floor> <count>")?;
                Ok(Command::SetEnter { floor, count })
            }
            "out" => {
                let (floor, count) = pair_args(&args, "out <floor> <count>")?;
                Ok(Command::SetExit { floor, count })
            }
            "resize" => Ok(Command::Resize(single_arg(&args, "resize <height>")?)),
            "status" => no_args(&args, "status", Command::Status),
            "quit" | "exit" => no_args(&args, "quit", Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

fn single_arg<T: FromStr>(args: &[&str], usage: &'static str) -> Result<T, CommandError> {
    match args {
        [value] => parse_number(value),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn pair_args(args: &[&str], usage: &'static str) -> Result<(u8, u32), CommandError> {
    match args {
        [floor, count] => Ok((parse_number(floor)?, parse_number(count)?)),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn no_args(args: &[&str], usage: &'static str, command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::Usage(usage))
    }
}
