//! Keyboard commands for the interactive browser.

use anyhow::{Context, Result, bail};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Next,
    Prev,
    Search(String),
    Follow(u64),
    Block(u64),
    Remount,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
commands:
  n, next        next page
  p, prev        previous page
  s <text>       search display names on this page (s alone clears)
  /<text>        same as s <text>
  f <id>         follow or unfollow a user
  b <id>         block a user for this session
  r              redraw after a rendering failure
  h, help        show this help
  q, quit        exit";

/// Parse one input line.
pub fn parse(line: &str) -> Result<Input> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    if let Some(text) = line.strip_prefix('/') {
        return Ok(Input::Search(text.trim().to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command {
        "n" | "next" => Input::Next,
        "p" | "prev" => Input::Prev,
        "s" | "search" => Input::Search(rest.to_string()),
        "f" | "follow" => Input::Follow(user_id(rest)?),
        "b" | "block" => Input::Block(user_id(rest)?),
        "r" | "redraw" => Input::Remount,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => bail!("unknown command '{other}' (h for help)"),
    };
    Ok(input)
}

fn user_id(arg: &str) -> Result<u64> {
    if arg.is_empty() {
        bail!("missing user id");
    }
    arg.parse()
        .with_context(|| format!("invalid user id '{arg}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation() {
        assert_eq!(parse("n").unwrap(), Input::Next);
        assert_eq!(parse(" prev ").unwrap(), Input::Prev);
        assert_eq!(parse("").unwrap(), Input::Empty);
        assert_eq!(parse("q").unwrap(), Input::Quit);
    }

    #[test]
    fn search_forms() {
        assert_eq!(parse("s ada").unwrap(), Input::Search("ada".to_string()));
        assert_eq!(parse("/Grace Hopper").unwrap(), Input::Search("Grace Hopper".to_string()));
        assert_eq!(parse("s").unwrap(), Input::Search(String::new()));
        assert_eq!(parse("/").unwrap(), Input::Search(String::new()));
    }

    #[test]
    fn annotations_need_ids() {
        assert_eq!(parse("f 22656").unwrap(), Input::Follow(22656));
        assert_eq!(parse("block 1").unwrap(), Input::Block(1));
        assert!(parse("f").is_err());
        assert!(parse("b abc").unwrap_err().to_string().contains("abc"));
    }

    #[test]
    fn unknown_command() {
        let err = parse("jump 3").unwrap_err();
        assert!(err.to_string().contains("jump"));
    }
}
