use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use wordtree::{RbTree, TreeError};

const HELP: &str = "\
commands:
  insert <word>   (or 1 <word>)
  search <word>   (or 2 <word>)
  delete <word>   (or 3 <word>)
  height | size | inorder | levelorder | help | quit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(String),
    Search(String),
    Delete(String),
    Height,
    Size,
    InOrder,
    LevelOrder,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs a word")]
    MissingWord(String),
    #[error("too many arguments for `{0}`")]
    TooManyArguments(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let with_word = |make: fn(String) -> Command| match args.as_slice() {
            [word] => Ok(make(word.to_string())),
            [] => Err(ParseError::MissingWord(name.to_string())),
            _ => Err(ParseError::TooManyArguments(name.to_string())),
        };
        let bare = |command: Command| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(ParseError::TooManyArguments(name.to_string()))
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "1" | "insert" | "i" => with_word(Command::Insert),
            "2" | "search" | "s" => with_word(Command::Search),
            "3" | "delete" | "d" => with_word(Command::Delete),
            "height" => bare(Command::Height),
            "size" => bare(Command::Size),
            "inorder" => bare(Command::InOrder),
            "levelorder" => bare(Command::LevelOrder),
            "help" | "?" => bare(Command::Help),
            "quit" | "q" | "exit" => bare(Command::Quit),
            _ => Err(ParseError::Unknown(name.to_string())),
        }
    }
}

/// Writes keys separated by spaces, or a note when there are none
pub fn print_keys<'a, W: Write>(
    out: &mut W,
    keys: impl Iterator<Item = &'a String>,
) -> io::Result<()> {
    let mut keys = keys.peekable();
    if keys.peek().is_none() {
        return writeln!(out, "Tree is empty");
    }
    let line: Vec<&str> = keys.map(String::as_str).collect();
    writeln!(out, "{}", line.join(" "))
}

/// The interactive front end: a tree plus the size counter the tree leaves to us
pub struct Session {
    tree: RbTree<String>,
    size: usize,
}

impl Session {
    pub fn new(tree: RbTree<String>, size: usize) -> Self {
        Self { tree, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Tree height is: {}", self.tree.height())?;
        writeln!(out, "Tree size is: {}", self.size)
    }

    /// Runs one command, returning `false` once the user asks to quit
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<bool> {
        match command {
            Command::Insert(word) => match self.tree.insert(word.clone()) {
                Ok(()) => {
                    self.size += 1;
                    debug!(%word, size = self.size, "inserted");
                    writeln!(out, "{word} inserted")?;
                    self.report(out)?;
                }
                Err(TreeError::AlreadyExists) => writeln!(out, "{word} already exists")?,
                Err(e) => writeln!(out, "{word}: {e}")?,
            },
            Command::Search(word) => match self.tree.search(word.as_str()) {
                Ok(found) => writeln!(out, "found {found}")?,
                Err(_) => writeln!(out, "{word} not found")?,
            },
            Command::Delete(word) => match self.tree.delete(word.as_str()) {
                Ok(removed) => {
                    self.size = self.size.saturating_sub(1);
                    debug!(%removed, size = self.size, "deleted");
                    writeln!(out, "{word} deleted")?;
                    self.report(out)?;
                }
                Err(_) => writeln!(out, "{word} not found")?,
            },
            Command::Height => writeln!(out, "{}", self.tree.height())?,
            Command::Size => writeln!(out, "{}", self.size)?,
            Command::InOrder => print_keys(out, self.tree.in_order())?,
            Command::LevelOrder => print_keys(out, self.tree.level_order())?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Reads commands line by line until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "{HELP}")?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.execute(command, out)? {
                        break;
                    }
                }
                Err(e) => writeln!(out, "{e}; type `help` for commands")?,
            }
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session() -> Session {
        let tree: RbTree<String> = ["Banana", "apple", "Cherry"]
            .into_iter()
            .map(String::from)
            .collect();
        Session::new(tree, 3)
    }

    fn run(session: &mut Session, input: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("insert kiwi".parse::<Command>(), Ok(Command::Insert("kiwi".into())));
        assert_eq!("1 kiwi".parse::<Command>(), Ok(Command::Insert("kiwi".into())));
        assert_eq!("SEARCH Kiwi".parse::<Command>(), Ok(Command::Search("Kiwi".into())));
        assert_eq!("3 kiwi".parse::<Command>(), Ok(Command::Delete("kiwi".into())));
        assert_eq!("  height ".parse::<Command>(), Ok(Command::Height));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "insert".parse::<Command>(),
            Err(ParseError::MissingWord("insert".into()))
        );
        assert_eq!(
            "size 3".parse::<Command>(),
            Err(ParseError::TooManyArguments("size".into()))
        );
        assert_eq!(
            "insert two words".parse::<Command>(),
            Err(ParseError::TooManyArguments("insert".into()))
        );
        assert_eq!(
            "fly away".parse::<Command>(),
            Err(ParseError::Unknown("fly".into()))
        );
    }

    #[test]
    fn test_insert_and_duplicate() {
        let mut s = session();
        let out = run(&mut s, "insert kiwi\ninsert KIWI\n");
        assert!(out.contains("kiwi inserted\nTree height is: 3\nTree size is: 4\n"), "{out}");
        assert!(out.contains("KIWI already exists"));
        assert_eq!(s.size(), 4);
    }

    #[test]
    fn test_search() {
        let mut s = session();
        let out = run(&mut s, "2 APPLE\n2 mango\n");
        assert!(out.contains("found apple\n"));
        assert!(out.contains("mango not found\n"));
    }

    #[test]
    fn test_delete() {
        let mut s = session();
        let out = run(&mut s, "delete banana\ninorder\ndelete banana\n");
        assert!(out.contains("banana deleted\nTree height is: 2\nTree size is: 2\n"), "{out}");
        assert!(out.contains("apple Cherry\n"));
        assert!(out.contains("banana not found"));
        assert_eq!(s.size(), 2);
    }

    #[test]
    fn test_traversals() {
        let mut s = session();
        let out = run(&mut s, "levelorder\ninorder\nheight\nsize\n");
        assert!(out.contains("Banana apple Cherry\napple Banana Cherry\n2\n3\n"), "{out}");

        let mut empty = Session::new(RbTree::new(), 0);
        let out = run(&mut empty, "inorder\n");
        assert!(out.contains("Tree is empty"));
    }

    #[test]
    fn test_delete_with_stale_size() {
        let tree: RbTree<String> = std::iter::once("fig".to_string()).collect();
        let mut s = Session::new(tree, 0);
        let out = run(&mut s, "delete fig\nsize\n");
        assert!(out.contains("fig deleted\n"), "{out}");
        assert_eq!(s.size(), 0);
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut s = session();
        let out = run(&mut s, "quit\ninsert kiwi\n");
        assert!(!out.contains("kiwi"));
        assert_eq!(s.size(), 3);
    }

    #[test]
    fn test_bad_input_continues() {
        let mut s = session();
        let out = run(&mut s, "fly away now\n\ninsert\n1 fig\n");
        assert!(out.contains("unknown command `fly`"));
        assert!(out.contains("`insert` needs a word"));
        assert!(out.contains("fig inserted"));
    }
}
