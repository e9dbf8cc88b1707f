//! Bilingual (Arabic/English) question-answering bot.
//!
//! A query is detected as Arabic or English ([`lang`]), translated into
//! English when needed ([`translate`]), matched against a keyword knowledge
//! base ([`knowledge`]) and the answer translated back ([`chat`]).

pub mod chat;
pub mod comms;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod lang;
pub mod logger;
pub mod translate;
