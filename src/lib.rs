//! Terminal client for ayurvedic plant and disease lookups: a query is turned
//! into a prompt for an OpenAI-compatible completion endpoint and the result
//! is decorated with a stock photo from the Pexels search API.

pub mod cli;
pub mod config;
pub mod external;
pub mod handlers;
pub mod llm;
pub mod printer;
pub mod prompt;
pub mod search;
pub mod tui;
