//! Keyword ladder
//!
//! Keywords are recognized letter by letter through a prefix tree built from
//! [`KEYWORDS`]. The lexer climbs one rung per character while the next
//! source character matches a child; as soon as it does not, the word is
//! finished as an identifier. A rung that spells a keyword only produces the
//! keyword when the word ends there (`if` vs `iffy`).

use super::token::TokenKind;
use std::sync::OnceLock;

/// Reserved words. Keywords are lowercase and case-sensitive.
pub const KEYWORDS: [(&str, TokenKind); 25] = [
    ("tile", TokenKind::Tile),
    ("glass", TokenKind::Glass),
    ("brick", TokenKind::Brick),
    ("wall", TokenKind::Wall),
    ("beam", TokenKind::Beam),
    ("field", TokenKind::Field),
    ("house", TokenKind::House),
    ("roof", TokenKind::Roof),
    ("cement", TokenKind::Cement),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("do", TokenKind::Do),
    ("crack", TokenKind::Crack),
    ("mend", TokenKind::Mend),
    ("room", TokenKind::Room),
    ("door", TokenKind::Door),
    ("ground", TokenKind::Ground),
    ("blueprint", TokenKind::Blueprint),
    ("home", TokenKind::Home),
    ("view", TokenKind::View),
    ("write", TokenKind::Write),
    ("solid", TokenKind::Solid),
    ("fragile", TokenKind::Fragile),
];

/// A position on the ladder (a node of the prefix tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung(usize);

#[derive(Debug, Default)]
struct LadderNode {
    children: Vec<(char, usize)>,
    accept: Option<TokenKind>,
}

#[derive(Debug)]
pub struct KeywordLadder {
    nodes: Vec<LadderNode>,
}

impl KeywordLadder {
    pub fn new(keywords: &[(&str, TokenKind)]) -> Self {
        let mut ladder = KeywordLadder {
            nodes: vec![LadderNode::default()],
        };
        for (word, kind) in keywords {
            let mut node = 0;
            for ch in word.chars() {
                node = match ladder.child(node, ch) {
                    Some(next) => next,
                    None => {
                        ladder.nodes.push(LadderNode::default());
                        let next = ladder.nodes.len() - 1;
                        ladder.nodes[node].children.push((ch, next));
                        next
                    }
                };
            }
            ladder.nodes[node].accept = Some(*kind);
        }
        ladder
    }

    /// The ladder for the language's keywords, built on first use.
    pub fn standard() -> &'static KeywordLadder {
        static LADDER: OnceLock<KeywordLadder> = OnceLock::new();
        LADDER.get_or_init(|| KeywordLadder::new(&KEYWORDS))
    }

    pub fn root(&self) -> Rung {
        Rung(0)
    }

    /// Climb one rung if `ch` continues some keyword from here.
    pub fn step(&self, rung: Rung, ch: char) -> Option<Rung> {
        self.child(rung.0, ch).map(Rung)
    }

    /// The keyword spelled by the path to this rung, if any.
    pub fn keyword_at(&self, rung: Rung) -> Option<TokenKind> {
        self.nodes.get(rung.0).and_then(|node| node.accept)
    }

    /// Whole-word lookup.
    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        let mut rung = self.root();
        for ch in word.chars() {
            rung = self.step(rung, ch)?;
        }
        self.keyword_at(rung)
    }

    /// Number of rungs, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        self.nodes.get(node).and_then(|node| {
            node.children
                .iter()
                .find(|(label, _)| *label == ch)
                .map(|(_, next)| *next)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_is_reachable() {
        let ladder = KeywordLadder::standard();
        for (word, kind) in KEYWORDS {
            assert_eq!(ladder.lookup(word), Some(kind), "{word}");
        }
    }

    #[test]
    fn test_prefixes_are_not_keywords() {
        let ladder = KeywordLadder::standard();
        assert_eq!(ladder.lookup("blue"), None);
        assert_eq!(ladder.lookup("ro"), None);
        assert_eq!(ladder.lookup("iffy"), None);
        assert_eq!(ladder.lookup("IF"), None);
        assert_eq!(ladder.lookup(""), None);
    }

    #[test]
    fn test_shared_prefixes_branch() {
        // do / door and roof / room share rungs
        let ladder = KeywordLadder::standard();
        let d = ladder.step(ladder.root(), 'd').unwrap();
        let d_o = ladder.step(d, 'o').unwrap();
        assert_eq!(ladder.keyword_at(d_o), Some(TokenKind::Do));
        let doo = ladder.step(d_o, 'o').unwrap();
        assert_eq!(ladder.keyword_at(doo), None);
        let door = ladder.step(doo, 'r').unwrap();
        assert_eq!(ladder.keyword_at(door), Some(TokenKind::Door));
        assert_eq!(ladder.lookup("roof"), Some(TokenKind::Roof));
        assert_eq!(ladder.lookup("room"), Some(TokenKind::Room));
    }

    #[test]
    fn test_custom_ladder() {
        let ladder = KeywordLadder::new(&[("ab", TokenKind::If)]);
        assert_eq!(ladder.len(), 3);
        assert!(!ladder.is_empty());
        assert_eq!(ladder.lookup("ab"), Some(TokenKind::If));
        assert_eq!(ladder.lookup("a"), None);
    }
}
