use std::str::FromStr;

use thiserror::Error;

use crate::ui::item::ItemDetails;

/// One line typed into the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Search(String),
    Find(String),
    Open(i32),
    Sell,
    Delete,
    Add(ItemDetails),
    Edit { item_id: i32, details: ItemDetails },
    EnterId(String),
    Back,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not an item id")]
    BadId(String),
}

pub const HELP: &str = "\
list                            show all items
search <text>                   filter the list by name
find <text>                     search by name or id
open <id>                       show item details
sell                            reduce the open item's quantity by one
delete                          delete the open item
enter-id <text>                 type into the details id field
add <name> <price> <qty>        add an item
edit <id> <name> <price> <qty>  change an item
back                            previous screen
quit                            exit";

fn parse_id(value: &str) -> Result<i32, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::BadId(value.to_string()))
}

/// `<name words...> <price> <qty>`: the last two words are the numbers,
/// everything before them is the name.
fn parse_fields(words: &[&str], usage: &'static str) -> Result<ItemDetails, CommandError> {
    let [name @ .., price, quantity] = words else {
        return Err(CommandError::Usage(usage));
    };
    if name.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(ItemDetails {
        id: 0,
        name: name.join(" "),
        price: price.to_string(),
        quantity: quantity.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let words: Vec<&str> = rest.split_whitespace().collect();

        match head {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Command::List),
            "search" => Ok(Command::Search(rest.to_string())),
            "find" => Ok(Command::Find(rest.to_string())),
            "open" => match words.as_slice() {
                [id] => Ok(Command::Open(parse_id(id)?)),
                _ => Err(CommandError::Usage("open <id>")),
            },
            "sell" => Ok(Command::Sell),
            "delete" => Ok(Command::Delete),
            "enter-id" => Ok(Command::EnterId(rest.to_string())),
            "add" => Ok(Command::Add(parse_fields(&words, "add <name> <price> <qty>")?)),
            "edit" => {
                const USAGE: &str = "edit <id> <name> <price> <qty>";
                let Some((id, fields)) = words.split_first() else {
                    return Err(CommandError::Usage(USAGE));
                };
                let item_id = parse_id(id)?;
                let mut details = parse_fields(fields, USAGE)?;
                details.id = item_id;
                Ok(Command::Edit { item_id, details })
            }
            "back" => Ok(Command::Back),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
