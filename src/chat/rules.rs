//! Keyword rules behind the mock coach.
//!
//! Rules are evaluated in order and the first one whose keyword appears in the
//! message (case-insensitive substring) wins. No scoring, no fuzzy matching.

use crate::models::Region;

/// Which canned reply a message selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ReplyKind {
    #[display("improve")]
    Improve,
    #[display("agent")]
    Agent,
    #[display("rank")]
    Rank,
    #[display("default")]
    Default,
}

/// A keyword group paired with its reply template.
///
/// Templates may contain `{username}` and `{region}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct CoachingRule {
    pub kind: ReplyKind,
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl CoachingRule {
    /// `lowered` must already be lower-cased
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

pub const IMPROVE_TEMPLATE: &str = "Based on your stats, {username}, I'd recommend:\n\n\
1. **Crosshair Placement**: Your headshot % is at 24.5%, which is solid but has room for improvement. Focus on keeping your crosshair at head level.\n\n\
2. **Positioning**: Your ADR of 168 is decent, but consistent positioning can help you trade more effectively.\n\n\
3. **Agent Pool**: You have a 55.6% win rate with Phoenix - consider playing him more often in your ranked games.";

pub const AGENT_TEMPLATE: &str = "Looking at your agent stats:\n\n\
• **Jett** (54.2% WR) - Your most played and successful agent\n\
• **Phoenix** (55.6% WR) - Highest win rate! Consider playing more\n\
• **Reyna** (50.0% WR) - Decent, but might benefit from VOD review\n\n\
I'd suggest sticking with Jett and Phoenix for ranked climbs, as they match your playstyle well.";

pub const RANK_TEMPLATE: &str = "To climb from Diamond 2:\n\n\
1. **Consistency**: Your 52.3% win rate is good for steady climbing\n\
2. **Focus on high-impact rounds**: Your KDA of 1.32 suggests you're trading well\n\
3. **Communication**: In Diamond, good comms can win rounds\n\
4. **Map knowledge**: You perform best on Ascent and Split - queue these more\n\n\
Keep grinding and you'll hit Diamond 3 soon!";

pub const DEFAULT_TEMPLATE: &str = "Hey {username}! I've analyzed your stats from {region}. \
With a 1.32 KDA and 52.3% win rate in Diamond 2, you're on the right track.\n\n\
What specific aspect of your gameplay would you like to improve? I can help with:\n\
• Agent selection\n\
• Aim and crosshair placement\n\
• Game sense and positioning\n\
• Rank climbing strategies";

pub const GREETING_TEMPLATE: &str = "Hey {username}! I'm your AI Valorant coach. \
I've analyzed your stats and I'm here to help you improve. What would you like to know?";

/// Prompts offered to the user before their first question
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How can I improve my gameplay?",
    "Which agent should I play?",
    "Tips for ranking up?",
    "How's my aim?",
];

/// Evaluation order matters: improve/better, then agent/character, then rank/climb.
pub const COACHING_RULES: [CoachingRule; 3] = [
    CoachingRule {
        kind: ReplyKind::Improve,
        keywords: &["improve", "better"],
        template: IMPROVE_TEMPLATE,
    },
    CoachingRule {
        kind: ReplyKind::Agent,
        keywords: &["agent", "character"],
        template: AGENT_TEMPLATE,
    },
    CoachingRule {
        kind: ReplyKind::Rank,
        keywords: &["rank", "climb"],
        template: RANK_TEMPLATE,
    },
];

fn render(template: &str, username: &str, region: &str) -> String {
    template
        .replace("{username}", username)
        .replace("{region}", region)
}

/// First rule whose keywords appear in `message`, in table order.
fn find_rule(message: &str) -> Option<CoachingRule> {
    let lowered = message.to_lowercase();
    COACHING_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .copied()
}

/// Pick the reply kind for a message without rendering it.
pub fn classify(message: &str) -> ReplyKind {
    find_rule(message)
        .map(|rule| rule.kind)
        .unwrap_or(ReplyKind::Default)
}

/// Render the canned reply for `message`.
///
/// `region` is taken as free text because the responder contract accepts any
/// string there; callers with a validated [`Region`] pass its display form.
pub fn reply_for(username: &str, region: &str, message: &str) -> (ReplyKind, String) {
    match find_rule(message) {
        Some(rule) => (rule.kind, render(rule.template, username, region)),
        None => (
            ReplyKind::Default,
            render(DEFAULT_TEMPLATE, username, region),
        ),
    }
}

/// Opening message of a chat session
pub fn greeting(username: &str, region: Region) -> String {
    render(GREETING_TEMPLATE, username, &region.to_string())
}
