//! Reading documents from files or stdin.

use serde_json::Value;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::blog::BlogInput;
use crate::document::{Document, validate_content};
use crate::error::Result;

/// Where the JSON text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `-` or no argument with piped stdin reads stdin; anything else is a path.
    pub fn from_arg(file: Option<&Path>) -> Option<Self> {
        match file {
            Some(path) if path == Path::new("-") => Some(Self::Stdin),
            Some(path) => Some(Self::File(path.to_path_buf())),
            None if !io::stdin().is_terminal() => Some(Self::Stdin),
            None => None,
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Self::File(path) => Ok(fs::read_to_string(path)?),
            Self::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// A parsed submission: a bare document or a whole blog post.
#[derive(Debug, Clone)]
pub enum Submission {
    Document(Value),
    Blog(Box<BlogInput>),
}

impl Submission {
    /// An object without a `type` tag but with a `content` field is a post.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let is_post = value
            .as_object()
            .is_some_and(|obj| !obj.contains_key("type") && obj.contains_key("content"));
        if is_post {
            Ok(Self::Blog(Box::new(serde_json::from_value(value)?)))
        } else {
            Ok(Self::Document(value))
        }
    }

    /// Validate and return the body. Posts are checked field by field too.
    pub fn into_document(self) -> Result<Document> {
        match self {
            Self::Document(value) => Ok(validate_content(&value)?),
            Self::Blog(post) => Ok(post.validate()?.content),
        }
    }
}

pub fn load_document(source: &InputSource) -> Result<Document> {
    let text = source.read()?;
    Submission::parse(&text)?.into_document()
}
