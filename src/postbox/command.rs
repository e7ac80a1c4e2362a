//! # Command Interpreter
//!
//! Pure mapping from a raw command line to a structured [`Command`]. The
//! caller trims the line; this module splits it on single spaces, normalizes
//! the first token case-insensitively, and validates the action-specific
//! arguments.
//!
//! Parsing never fails: malformed input becomes [`Command::Usage`] and an
//! unrecognized action becomes [`Command::Unknown`], both of which the
//! controller renders without touching the remote service.

/// A fully interpreted command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Display all posts.
    List,
    /// View a single post by id.
    View(u64),
    /// Open the post-composition form.
    Create,
    /// Search posts; the query is the remaining tokens rejoined with spaces.
    Search(String),
    /// Look up the current token price (plugin command, outside the
    /// post-storage domain).
    Price,
    /// Display the static command list.
    Help,
    /// Arguments were missing or malformed; contains the usage hint.
    Usage(&'static str),
    /// The first token matched no known action.
    Unknown(String),
}

pub const HELP_TEXT: &str = "Available commands:\n\
    - list: Display all posts\n\
    - view [post_id]: View a specific post\n\
    - create: Open the post composition form\n\
    - search [query]: Search posts\n\
    - price: Display the current ICP price\n\
    - help: Display this help message";

pub const UNKNOWN_TEXT: &str = "Unknown command. Type \"help\" for available commands.";

const VIEW_USAGE: &str = "Usage: view [post_id]";
const SEARCH_USAGE: &str = "Usage: search [query]";

/// Interpret a single (pre-trimmed) command line.
pub fn parse(line: &str) -> Command {
    let mut parts = line.split(' ');
    let action = parts.next().unwrap_or_default().to_lowercase();

    match action.as_str() {
        "list" => Command::List,
        "view" => match parts.next().map(str::parse::<u64>) {
            Some(Ok(id)) => Command::View(id),
            _ => Command::Usage(VIEW_USAGE),
        },
        "create" => Command::Create,
        "search" => {
            let query = parts.collect::<Vec<_>>().join(" ");
            if query.trim().is_empty() {
                Command::Usage(SEARCH_USAGE)
            } else {
                Command::Search(query)
            }
        }
        "price" => Command::Price,
        "help" => Command::Help,
        _ => Command::Unknown(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_actions() {
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("create"), Command::Create);
        assert_eq!(parse("price"), Command::Price);
        assert_eq!(parse("help"), Command::Help);
    }

    #[test]
    fn action_is_case_insensitive() {
        assert_eq!(parse("LIST"), Command::List);
        assert_eq!(parse("View 7"), Command::View(7));
    }

    #[test]
    fn view_takes_an_integer_id() {
        assert_eq!(parse("view 42"), Command::View(42));
    }

    #[test]
    fn view_without_id_is_a_usage_error() {
        assert_eq!(parse("view"), Command::Usage(VIEW_USAGE));
    }

    #[test]
    fn view_with_non_integer_id_is_a_usage_error() {
        assert_eq!(parse("view seven"), Command::Usage(VIEW_USAGE));
        assert_eq!(parse("view -3"), Command::Usage(VIEW_USAGE));
    }

    #[test]
    fn search_rejoins_the_query_with_single_spaces() {
        assert_eq!(
            parse("search rust async io"),
            Command::Search("rust async io".into())
        );
    }

    #[test]
    fn search_without_query_is_a_usage_error() {
        assert_eq!(parse("search"), Command::Usage(SEARCH_USAGE));
    }

    #[test]
    fn unrecognized_action_is_unknown() {
        assert_eq!(parse("frobnicate"), Command::Unknown("frobnicate".into()));
        assert_eq!(parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn every_input_maps_to_exactly_one_outcome() {
        // A grab bag of awkward lines; none of them may panic.
        for line in [
            "view 99999999999999999999999999",
            "search ",
            "list extra args",
            "  ",
            "création",
            "view 1 2 3",
        ] {
            let _ = parse(line);
        }
    }
}
