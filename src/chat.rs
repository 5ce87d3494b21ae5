//! Study-partner tutor chat.
//!
//! Multi-turn chat over the same generator seam as question resolution:
//! each send replays the transcript into a single prompt and the reply
//! comes back as one strict JSON object, never free text.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::source::decode::parse_json;
use crate::source::{RemoteGenerator, SourceUnavailable};

const TUTOR_INSTRUCTION: &str = "You are an expert exam preparation tutor specializing in \
     Odisha Government Exams (OPSC, OSSSC), OSSC, UPSC, and Banking (IBPS). Help the student \
     with concepts, formulas, and general knowledge.";

/// Who spoke a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    Student,
    Tutor,
}

/// One turn of the tutoring conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct ChatReplyRecord {
    reply: String,
}

/// One tutoring conversation. Holds the transcript locally; the remote
/// service is stateless between calls.
pub struct StudyChat {
    generator: Arc<dyn RemoteGenerator>,
    transcript: Vec<ChatTurn>,
}

impl StudyChat {
    pub fn new(generator: Arc<dyn RemoteGenerator>) -> Self {
        Self {
            generator,
            transcript: Vec::new(),
        }
    }

    /// Sends a student message and returns the tutor's reply. On failure
    /// the transcript is left untouched, so the message can be re-sent.
    pub fn send(&mut self, message: impl Into<String>) -> Result<String, SourceUnavailable> {
        let message = message.into();
        let prompt = self.build_prompt(&message);
        let payload = self
            .generator
            .generate_json(&prompt)
            .map_err(SourceUnavailable)?;
        let record: ChatReplyRecord =
            parse_json(&payload).map_err(|err| SourceUnavailable(err.into()))?;
        self.transcript.push(ChatTurn {
            role: ChatRole::Student,
            text: message,
        });
        self.transcript.push(ChatTurn {
            role: ChatRole::Tutor,
            text: record.reply.clone(),
        });
        Ok(record.reply)
    }

    /// Every turn exchanged so far, oldest first.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    fn build_prompt(&self, message: &str) -> String {
        let mut prompt = String::from(TUTOR_INSTRUCTION);
        prompt.push_str("\n\nConversation so far:\n");
        for turn in &self.transcript {
            let speaker = match turn.role {
                ChatRole::Student => "Student",
                ChatRole::Tutor => "Tutor",
            };
            let _ = writeln!(prompt, "{speaker}: {}", turn.text);
        }
        let _ = writeln!(prompt, "Student: {message}");
        prompt.push_str(
            "\nOUTPUT FORMAT: return one strict JSON object with a single field \"reply\" \
             (string, the tutor's answer to the last student message). No markdown, no \
             surrounding text.",
        );
        prompt
    }
}
