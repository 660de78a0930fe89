//! Error types for spark-gui.
//!
//! Only tree construction can fail. Layout, rendering, and event dispatch
//! guard and clamp locally and never surface an error to the frame loop.

use thiserror::Error;

use crate::engine::NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuiError {
    #[error("invalid constraint '{token}'")]
    InvalidConstraint { token: String },

    #[error("invalid pixel value '{token}'")]
    InvalidPixelValue { token: String },

    #[error("invalid color '{value}'")]
    InvalidColor { value: String },

    #[error("unknown {kind} '{value}'")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("screen '{screen}' already has a node attached with id '{id}'")]
    DuplicateNodeId { screen: String, id: String },

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node '{0}' can not have sub nodes")]
    NotAParentNode(String),

    #[error("scroll owner '{owner}' has no content node '{expected}'")]
    MissingScrollContent { owner: String, expected: String },
}

pub type Result<T> = std::result::Result<T, GuiError>;
