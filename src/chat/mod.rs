//! Conversation records and the keyword rules used by the mock coach.

pub mod message;
pub mod rules;

pub use message::{ChatMessage, ChatRole, Transcript};
pub use rules::{
    classify, greeting, reply_for, CoachingRule, ReplyKind, COACHING_RULES, SUGGESTED_QUESTIONS,
};
