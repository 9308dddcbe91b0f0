//! # Terminal Commands
//!
//! One line of terminal input becomes one [`Command`]. Lines starting with `/` are
//! commands; anything else is a chat message.

use std::path::PathBuf;

use crate::core::error::{ClientError, Result};

pub const HELP: &str = "\
/upload <path>              add a .pdf, .txt or .md document
/docs                       list documents
/rm-doc <i>                 remove document i
/search [query; query ...]  search the web (default queries when none given)
/sources                    list web sources
/rm-source <i>              remove web source i
/activate                   start the conversation
/history                    show the conversation
/video <i> <image path>     generate a video for assistant message i (Ctrl-C cancels)
/reset                      clear the conversation
/help                       show this help
/quit                       exit
anything else               send as a chat message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    Docs,
    RemoveDocument(usize),
    /// `None` means "use the session's default queries".
    Search(Option<Vec<String>>),
    Sources,
    RemoveSource(usize),
    Activate,
    History,
    Video { message: usize, image: PathBuf },
    Reset,
    Help,
    Quit,
    Chat(String),
    Empty,
}

fn index_arg(command: &str, arg: &str) -> Result<usize> {
    arg.trim()
        .parse()
        .map_err(|_| {
            ClientError::Validation(format!(
                "{} expects an index, got {:?}",
                command,
                arg.trim()
            ))
        })
}

fn required<'a>(command: &str, arg: &'a str, what: &str) -> Result<&'a str> {
    let arg = arg.trim();
    if arg.is_empty() {
        Err(ClientError::Validation(format!("{} expects {}", command, what)))
    } else {
        Ok(arg)
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }
        if !line.starts_with('/') {
            return Ok(Command::Chat(line.to_string()));
        }

        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let command = match name {
            "/upload" => Command::Upload(PathBuf::from(required(name, rest, "a file path")?)),
            "/docs" => Command::Docs,
            "/rm-doc" => Command::RemoveDocument(index_arg(name, rest)?),
            "/search" => {
                let queries: Vec<String> = rest
                    .split(';')
                    .map(str::trim)
                    .filter(|q| !q.is_empty())
                    .map(str::to_string)
                    .collect();
                Command::Search((!queries.is_empty()).then_some(queries))
            }
            "/sources" => Command::Sources,
            "/rm-source" => Command::RemoveSource(index_arg(name, rest)?),
            "/activate" => Command::Activate,
            "/history" => Command::History,
            "/video" => {
                let rest = required(name, rest, "a message index and an image path")?;
                let (index, image) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    ClientError::Validation(
                        "/video expects a message index and an image path".to_string(),
                    )
                })?;
                Command::Video {
                    message: index_arg(name, index)?,
                    image: PathBuf::from(image.trim()),
                }
            }
            "/reset" => Command::Reset,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => {
                return Err(ClientError::Validation(format!(
                    "Unknown command {}. Type /help for the list",
                    other
                )))
            }
        };
        Ok(command)
    }
}
