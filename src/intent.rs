//! Conversational intent short-circuiting.
//!
//! Trivial chit-chat ("hi", "thanks", "ok") is answered from a canned reply
//! table without ever reaching the generation gateway. The rule table is an
//! ordered list evaluated first-match-wins: categories overlap (a bare "ok"
//! would also look like a short gibberish token), so ordering is part of the
//! contract, not an implementation detail.
//!
//! Classification is total: any input string produces exactly one
//! [`IntentMatch`], never an error.

use rand::Rng;
use regex::Regex;

/// Recognized conversational intent categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Greeting,
    SimpleGreetingWord,
    Gratitude,
    Appreciation,
    Farewell,
    Agreement,
    Confusion,
    Gibberish,
    /// No conversational intent; proceed to full analysis.
    None,
}

/// Outcome of classifying a user message.
#[derive(Debug, Clone)]
pub struct IntentMatch {
    pub kind: IntentKind,
    /// Canned reply for matched intents; `None` for [`IntentKind::None`].
    pub reply: Option<String>,
}

impl IntentMatch {
    fn none() -> Self {
        Self {
            kind: IntentKind::None,
            reply: None,
        }
    }
}

struct IntentRule {
    kind: IntentKind,
    pattern: Regex,
    replies: &'static [&'static str],
}

const GREETING_REPLIES: &[&str] = &[
    "Hello! Ask me anything about this video.",
    "Hi there! I can answer questions about the video and point you to timestamps.",
    "Hey! What would you like to know about the video?",
];

const SIMPLE_GREETING_REPLIES: &[&str] = &[
    "Hey! Ready when you are - ask me about the video.",
    "Hi! Want a summary, or is there a specific part you're curious about?",
];

const GRATITUDE_REPLIES: &[&str] = &[
    "You're welcome! Anything else about the video?",
    "Happy to help! Let me know if another part needs explaining.",
    "Any time. Ask away if something else comes up.",
];

const APPRECIATION_REPLIES: &[&str] = &[
    "Glad that helped!",
    "Thanks! Want to dig into another part of the video?",
    "Good to hear. There's more in the breakdown if you want to keep going.",
];

const FAREWELL_REPLIES: &[&str] = &[
    "Goodbye! Come back if you have more questions about the video.",
    "See you! The breakdown will be here when you return.",
    "Take care!",
];

const AGREEMENT_REPLIES: &[&str] = &[
    "Great - what should we look at next?",
    "Sounds good. Anything else in the video you'd like to explore?",
    "Alright. Ask whenever you're ready.",
];

const CONFUSION_REPLIES: &[&str] = &[
    "No problem - could you rephrase that? Naming a topic or a timestamp helps.",
    "Let me try again: what part of the video should I explain?",
    "I might have been unclear. Which bit would you like me to go over?",
];

const GIBBERISH_REPLIES: &[&str] = &[
    "I didn't quite catch that. Try asking about a moment or topic in the video.",
    "Not sure what you meant - you can ask things like \"what happens at 2:30?\".",
];

/// Pattern-table classifier for non-substantive messages.
///
/// Holds only the compiled rule table; reply selection takes the randomness
/// source as a parameter so callers (and tests) control determinism.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        // Full-string anchors with optional trailing punctuation; the table
        // order is significant and matches the doc comment above.
        let table: &[(IntentKind, &str, &'static [&'static str])] = &[
            (
                IntentKind::Greeting,
                r"(?i)^(hi|hello|hey|hiya|howdy|good (morning|afternoon|evening))( there| everyone| all)?[\s.!?,]*$",
                GREETING_REPLIES,
            ),
            (
                IntentKind::SimpleGreetingWord,
                r"(?i)^(yo|sup|heya|hei|hallo|hola)[\s.!?,]*$",
                SIMPLE_GREETING_REPLIES,
            ),
            (
                IntentKind::Gratitude,
                r"(?i)^(thanks|thank you|thank u|thx|ty|cheers)( a lot| so much| very much)?[\s.!?,]*$",
                GRATITUDE_REPLIES,
            ),
            (
                IntentKind::Appreciation,
                r"(?i)^(awesome|great|cool|nice|perfect|amazing|excellent|brilliant|love it)( stuff| work| answer)?[\s.!?,]*$",
                APPRECIATION_REPLIES,
            ),
            (
                IntentKind::Farewell,
                r"(?i)^(bye|goodbye|good bye|see ya|see you|later|gotta go|good night)[\s.!?,]*$",
                FAREWELL_REPLIES,
            ),
            (
                IntentKind::Agreement,
                r"(?i)^(ok|okay|okey|kk|sure|yes|yep|yeah|yup|alright|all right|sounds good|got it|will do|makes sense)[\s.!?,]*$",
                AGREEMENT_REPLIES,
            ),
            (
                IntentKind::Confusion,
                r"(?i)^(what|huh|wut|wat|eh|i (don'?t|do not) (get|understand) (it|that|this)|i'?m (lost|confused)|confused)[\s.!?,]*$",
                CONFUSION_REPLIES,
            ),
            (IntentKind::Confusion, r"^[?¿]+$", CONFUSION_REPLIES),
            // Short consonant-only tokens ("asdf", "hmm") read as keyboard
            // noise. Real words reach here only if no earlier rule claimed
            // them.
            (
                IntentKind::Gibberish,
                r"(?i)^[bcdfghjklmnpqrstvwxz]{2,8}[\s.!?,]*$",
                GIBBERISH_REPLIES,
            ),
        ];

        let rules = table
            .iter()
            .map(|&(kind, pattern, replies)| IntentRule {
                kind,
                pattern: Regex::new(pattern).expect("Invalid intent pattern"),
                replies,
            })
            .collect();

        Self { rules }
    }

    /// Classify a raw user message.
    ///
    /// The message is trimmed before matching. On a match, a reply is drawn
    /// uniformly from the category's canned list using `rng`.
    pub fn classify(&self, message: &str, rng: &mut impl Rng) -> IntentMatch {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return IntentMatch::none();
        }

        for rule in &self.rules {
            if rule.pattern.is_match(trimmed) {
                let reply = rule.replies[rng.gen_range(0..rule.replies.len())];
                return IntentMatch {
                    kind: rule.kind,
                    reply: Some(reply.to_string()),
                };
            }
        }

        IntentMatch::none()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classify(message: &str) -> IntentMatch {
        let classifier = IntentClassifier::new();
        let mut rng = StdRng::seed_from_u64(7);
        classifier.classify(message, &mut rng)
    }

    #[test]
    fn test_greeting() {
        assert_eq!(classify("hello").kind, IntentKind::Greeting);
        assert_eq!(classify("Hey there!").kind, IntentKind::Greeting);
        assert_eq!(classify("good morning").kind, IntentKind::Greeting);
    }

    #[test]
    fn test_gratitude_has_reply() {
        let m = classify("thanks!");
        assert_eq!(m.kind, IntentKind::Gratitude);
        assert!(!m.reply.unwrap().is_empty());
    }

    #[test]
    fn test_gratitude_variants() {
        assert_eq!(classify("Thank you so much").kind, IntentKind::Gratitude);
        assert_eq!(classify("thx").kind, IntentKind::Gratitude);
    }

    #[test]
    fn test_agreement_before_gibberish() {
        // "kk" would match the gibberish rule too; the agreement rule comes
        // first in the table and must win.
        assert_eq!(classify("kk").kind, IntentKind::Agreement);
        assert_eq!(classify("ok").kind, IntentKind::Agreement);
        assert_eq!(classify("okay.").kind, IntentKind::Agreement);
    }

    #[test]
    fn test_farewell_and_appreciation() {
        assert_eq!(classify("bye").kind, IntentKind::Farewell);
        assert_eq!(classify("awesome").kind, IntentKind::Appreciation);
    }

    #[test]
    fn test_confusion() {
        assert_eq!(classify("huh?").kind, IntentKind::Confusion);
        assert_eq!(classify("???").kind, IntentKind::Confusion);
        assert_eq!(classify("I don't get it").kind, IntentKind::Confusion);
    }

    #[test]
    fn test_gibberish() {
        assert_eq!(classify("asdf").kind, IntentKind::Gibberish);
        assert_eq!(classify("hmm").kind, IntentKind::Gibberish);
    }

    #[test]
    fn test_substantive_message_is_none() {
        let m = classify("What does the speaker say about memory safety at 2:30?");
        assert_eq!(m.kind, IntentKind::None);
        assert!(m.reply.is_none());
    }

    #[test]
    fn test_partial_match_is_none() {
        // Anchored patterns: a greeting embedded in a real question must not
        // short-circuit.
        assert_eq!(classify("hi, can you summarize the video?").kind, IntentKind::None);
    }

    #[test]
    fn test_total_over_odd_inputs() {
        for input in ["", "   ", "\n\t", "🦀🦀🦀", "a]['#", &"x".repeat(10_000)] {
            let _ = classify(input);
        }
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        let classifier = IntentClassifier::new();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = classifier.classify("hello", &mut a);
        let second = classifier.classify("hello", &mut b);
        assert_eq!(first.reply, second.reply);
    }
}
