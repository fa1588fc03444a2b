use serde::Deserialize;
use serde_json::Value;

use models::validate::require;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub title: String,
    /// Editor document, stored as-is.
    pub content: Value,
    pub author: String,
}

impl NewArticle {
    pub fn check(&self) -> Result<(), ServiceError> {
        require("title", &self.title)?;
        require("author", &self.author)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleChanges {
    pub title: String,
    pub content: Value,
    /// Free-form publication state such as `draft` or `published`.
    pub status: String,
}

impl ArticleChanges {
    pub fn check(&self) -> Result<(), ServiceError> {
        require("title", &self.title)?;
        require("status", &self.status)?;
        Ok(())
    }
}
