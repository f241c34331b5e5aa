//! Interactive session state: current domain and tone, the history, and
//! the last recommended chat tool.

use services::ApiKey;
use shared::history::History;
use synthesizer::{persona_for, route_recommendation, tone_label, ModelLink, PromptSynthesizer, SynthesisOutcome};

/// Result of one request, ready to render
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Generated {
        prompt: String,
        model: String,
        link: ModelLink,
    },
    /// Backend is rate limiting; the user should wait and retry
    Busy,
    Failed(String),
    /// Nothing was sent (missing text)
    Rejected(&'static str),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request(String),
    Domain(String),
    Tone(String),
    History,
    Export(String),
    Open,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Request(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match (name, arg) {
        ("domain" | "d", arg) if !arg.is_empty() => Command::Domain(arg.to_string()),
        ("tone" | "t", arg) if !arg.is_empty() => Command::Tone(arg.to_string()),
        ("export" | "e", arg) if !arg.is_empty() => Command::Export(arg.to_string()),
        ("history" | "h", _) => Command::History,
        ("open" | "o", _) => Command::Open,
        ("help" | "?", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

pub struct Session {
    synthesizer: PromptSynthesizer,
    api_key: ApiKey,
    domain: String,
    tone: String,
    history: History,
    last_link: Option<ModelLink>,
}

impl Session {
    pub fn new(
        synthesizer: PromptSynthesizer,
        api_key: ApiKey,
        domain: &str,
        tone: &str,
        history: History,
    ) -> Self {
        Self {
            synthesizer,
            api_key,
            domain: domain.to_string(),
            tone: tone_label(tone),
            history,
            last_link: None,
        }
    }

    /// Run one request and record it on success.
    pub async fn submit(&mut self, request: &str) -> Reply {
        if request.trim().is_empty() {
            return Reply::Rejected("missing request text");
        }

        let outcome = self
            .synthesizer
            .generate(self.api_key.expose(), request, &self.domain, &self.tone)
            .await;

        if let Some(entry) = outcome.history_entry(request) {
            self.history.record(entry);
        }

        match outcome {
            SynthesisOutcome::Success(s) => {
                let link = route_recommendation(&s.recommendation);
                self.last_link = Some(link);
                Reply::Generated {
                    prompt: s.prompt,
                    model: s.model,
                    link,
                }
            }
            SynthesisOutcome::QuotaExceeded => Reply::Busy,
            failed @ SynthesisOutcome::Failed(_) => Reply::Failed(failed.text()),
        }
    }

    /// Switch domain; returns the persona label actually in effect
    pub fn set_domain(&mut self, domain: &str) -> &'static str {
        self.domain = domain.to_string();
        persona_for(domain).label
    }

    pub fn set_tone(&mut self, tone: &str) -> &str {
        self.tone = tone_label(tone);
        &self.tone
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn last_link(&self) -> Option<ModelLink> {
        self.last_link
    }
}

pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::Generated {
            prompt,
            model,
            link,
        } => format!(
            "מוכן! ({})\n\n{}\n\nפתח ב-{}: {}",
            model, prompt, link.label, link.url
        ),
        Reply::Busy => "עומס רגעי, נסה שוב.".to_string(),
        Reply::Failed(message) => message.clone(),
        Reply::Rejected(reason) => format!("חסר מפתח או טקסט ({})", reason),
    }
}

/// Compact view of the latest entries: time plus a prompt preview
pub fn render_history(history: &History, count: usize) -> String {
    if history.is_empty() {
        return "(אין היסטוריה)".to_string();
    }
    history
        .latest(count)
        .iter()
        .map(|e| format!("🕒 {} [{}]\n   {}", e.formatted_time(), e.engine_used, e.prompt_preview()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub const HELP: &str = "\
Type a task to generate a prompt. Commands:
  :domain <key>   switch domain (marketing, software, creative, strategy, general)
  :tone <tone>    switch tone (formal, direct, creative, marketing)
  :history        show recent prompts
  :export <path>  save the full history as CSV
  :open           open the last recommended chat tool
  :quit           leave the session";
