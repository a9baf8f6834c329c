use super::enums::QuoteType;

const NAGGING: &[&str] = &[
    "You won't be able to do it... Prove me wrong!",
    "Don't disappoint future you.",
    "Less scrolling, more doing!",
    "That task isn't going to complete itself.",
    "Are you a talker or a doer?",
    "Time is ticking. Are you?",
    "Stop procrastinating. Start dominating.",
    "Is this the best use of your time right now?",
    "The clock is your boss. Don't get fired.",
];

const RUDE: &[&str] = &[
    "Are you actually going to finish this time?",
    "Your procrastination is impressive, really.",
    "Oh look, another task you'll abandon.",
    "Half-finished tasks won't impress anyone.",
    "You call that productivity? I've seen snails move faster.",
    "Your to-do list is laughing at you right now.",
    "Great, another project for your 'abandoned' collection.",
    "Are you even trying at this point?",
    "Your focus is as stable as a house of cards.",
];

const ANNOYING: &[&str] = &[
    "Tick tock! Time is passing! Tick tock!",
    "Hey! Hey! Hey! You should be working!",
    "Don't stop! Keep going! Don't stop! Keep going!",
    "Are you distracted yet? How about now? Now?",
    "This won't complete itself! This won't complete itself!",
    "Focus! Focus! Focus! Are you focused yet?",
    "Hey, remember that deadline? It's coming! Coming! Coming!",
    "Still working? Still working? Still working?",
    "Did you finish yet? No? How about now? Now? Now?",
];

const ABUSIVE: &[&str] = &[
    "Your productivity is an absolute joke.",
    "Even a child could finish this faster than you.",
    "Pathetic effort as usual.",
    "You'll never amount to anything at this rate.",
    "Everyone else finished hours ago. What's your excuse?",
    "Failure is your only consistent achievement.",
    "No wonder nobody takes your work seriously.",
    "This is why you're always behind everyone else.",
    "Your lack of discipline is embarrassing.",
];

/// Seconds between quote rotations while the timer is stopped
pub const QUOTE_ROTATION_SECS: i64 = 30;

pub fn quotes(kind: QuoteType) -> &'static [&'static str] {
    match kind {
        QuoteType::Nagging => NAGGING,
        QuoteType::Rude => RUDE,
        QuoteType::Annoying => ANNOYING,
        QuoteType::Abusive => ABUSIVE,
    }
}

/// Quote at a rotating index (wraps)
pub fn quote_at(kind: QuoteType, index: usize) -> &'static str {
    let list = quotes(kind);
    list[index % list.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_quotes() {
        for kind in QuoteType::all() {
            assert_eq!(quotes(*kind).len(), 9);
        }
    }

    #[test]
    fn test_quote_at_wraps() {
        assert_eq!(quote_at(QuoteType::Nagging, 0), quote_at(QuoteType::Nagging, 9));
    }
}
