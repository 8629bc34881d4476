//! Question pool: the candidate interview questions.
//!
//! The first [`CURATED_LEN`] entries form the curated prefix ("厳選"). Order is
//! significant: curated draws only ever see that prefix. The page may swap in
//! its own list via `POST /api/questions`.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Length of the curated prefix.
pub const CURATED_LEN: usize = 50;

/// Built-in pool. Entries `[0, CURATED_LEN)` are the curated set.
pub const QUESTIONS: &[&str] = &[
    // ── curated ──
    "あなたの名前と、その由来を教えてください。",
    "一番大切にしているものは何ですか？",
    "子どもの頃の夢は何でしたか？",
    "好きな食べ物と嫌いな食べ物は？",
    "休日はどのように過ごしていますか？",
    "自分の性格を一言で表すと？",
    "今までで一番嬉しかった出来事は？",
    "今までで一番悔しかった出来事は？",
    "誰にも言えない秘密はありますか？",
    "尊敬している人は誰ですか？",
    "苦手なものや怖いものは何ですか？",
    "あなたにとって「家族」とは？",
    "大切な人に一言伝えるとしたら？",
    "自分の長所と短所を教えてください。",
    "これだけは譲れない、というこだわりは？",
    "朝起きて最初にすることは？",
    "眠れない夜は何をしていますか？",
    "一番の宝物は何ですか？",
    "もし一日だけ別人になれるなら誰になりたい？",
    "もし魔法がひとつ使えるなら何を願う？",
    "最近ハマっていることは？",
    "得意なことと不得意なことは？",
    "好きな季節とその理由は？",
    "好きな言葉や座右の銘は？",
    "今一番会いたい人は？",
    "過去に戻れるならいつに戻りたい？",
    "十年後、何をしていると思いますか？",
    "生まれ変わったら何になりたい？",
    "友達からはどんな人だと言われますか？",
    "怒るとどうなりますか？",
    "泣いたのはいつが最後ですか？",
    "自分へのご褒美は何ですか？",
    "一番の思い出の場所は？",
    "ライバルはいますか？",
    "恋愛観を教えてください。",
    "理想の一日を教えてください。",
    "口癖はありますか？",
    "ついやってしまう癖は？",
    "人生で一番大きな決断は？",
    "あなたを動かす原動力は何ですか？",
    "許せないことは何ですか？",
    "誰かに言われて忘れられない言葉は？",
    "自分の好きなところはどこですか？",
    "変えたいと思っている自分の一面は？",
    "どんな時に幸せを感じますか？",
    "守りたいものは何ですか？",
    "今の目標を教えてください。",
    "仲間の中でのあなたの役割は？",
    "最後の晩餐に何を食べたい？",
    "読者（プレイヤー）に一言お願いします！",
    // ── full pool only ──
    "好きな色は何ですか？",
    "好きな動物は何ですか？",
    "得意料理はありますか？",
    "朝型ですか、夜型ですか？",
    "犬派ですか、猫派ですか？",
    "ペットを飼うなら何がいい？",
    "好きな音楽のジャンルは？",
    "よく行くお店はありますか？",
    "収集しているものはありますか？",
    "最近笑ったことは？",
    "最近驚いたことは？",
    "最近困ったことは？",
    "雨の日は好きですか？",
    "一番長く続いている習慣は？",
    "苦手な人のタイプは？",
    "好きな人のタイプは？",
    "お金を自由に使えるなら何に使う？",
    "無人島にひとつだけ持っていくなら？",
    "自分を動物に例えると？",
    "自分のテーマソングを選ぶなら？",
    "得意な遊びやゲームは？",
    "運動は得意ですか？",
    "勉強は好きでしたか？",
    "一番古い記憶は何ですか？",
    "迷信やジンクスは信じますか？",
    "旅行するならどこへ行きたい？",
    "もらって嬉しいプレゼントは？",
    "寝る前のルーティンは？",
    "自分だけが知っている豆知識は？",
    "最後に一言、自由にどうぞ！",
];

/// Which part of the pool a draw may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Entire pool ("ランダム6問（全体）").
    All,
    /// Curated prefix ("厳選6問（上位50）").
    Curated,
}

impl Source {
    /// Parse a `source` form value. Anything but "curated" draws from the full pool.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("curated") {
            Source::Curated
        } else {
            Source::All
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Source::All => "all",
            Source::Curated => "curated",
        }
    }
}

/// Ordered, read-only list of candidate questions.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPool {
    items: Vec<String>,
}

impl Default for QuestionPool {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuestionPool {
    pub fn builtin() -> Self {
        Self::new(QUESTIONS.iter().map(|q| q.to_string()).collect())
    }

    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Parse a JSON array of question strings. Blank entries are dropped;
    /// a pool with nothing left is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PoolDoc {
            List(Vec<String>),
            Wrapped { questions: Vec<String> },
        }

        let doc: PoolDoc = serde_json::from_str(json)
            .map_err(|e| Error::InvalidQuestionPool(e.to_string()))?;
        let raw = match doc {
            PoolDoc::List(items) | PoolDoc::Wrapped { questions: items } => items,
        };
        let items: Vec<String> = raw
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if items.is_empty() {
            return Err(Error::InvalidQuestionPool("no questions supplied".to_string()));
        }
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn all(&self) -> &[String] {
        &self.items
    }

    /// Curated prefix, or the whole pool when it is shorter than [`CURATED_LEN`].
    pub fn curated(&self) -> &[String] {
        &self.items[..self.items.len().min(CURATED_LEN)]
    }

    pub fn source(&self, source: Source) -> &[String] {
        match source {
            Source::All => self.all(),
            Source::Curated => self.curated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_pool_has_curated_prefix_and_extras() {
        let pool = QuestionPool::builtin();
        assert!(pool.len() > CURATED_LEN);
        assert_eq!(pool.curated().len(), CURATED_LEN);
        assert_eq!(pool.curated()[0], QUESTIONS[0]);
        assert_eq!(pool.curated()[CURATED_LEN - 1], QUESTIONS[CURATED_LEN - 1]);
    }

    #[test]
    fn builtin_questions_are_unique() {
        let unique: HashSet<&str> = QUESTIONS.iter().copied().collect();
        assert_eq!(unique.len(), QUESTIONS.len());
    }

    #[test]
    fn short_pool_curated_is_whole_pool() {
        let pool = QuestionPool::new(vec!["a".into(), "b".into()]);
        assert_eq!(pool.curated(), pool.all());
    }

    #[test]
    fn source_parse() {
        assert_eq!(Source::parse("curated"), Source::Curated);
        assert_eq!(Source::parse("all"), Source::All);
        assert_eq!(Source::parse(""), Source::All);
    }

    #[test]
    fn from_json_accepts_plain_and_wrapped_lists() {
        let pool = QuestionPool::from_json(r#"["Q1", "  Q2 ", ""]"#).unwrap();
        assert_eq!(pool.all(), &["Q1".to_string(), "Q2".to_string()]);

        let pool = QuestionPool::from_json(r#"{"questions": ["Q1"]}"#).unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn from_json_rejects_empty_and_malformed() {
        assert!(matches!(
            QuestionPool::from_json("[]"),
            Err(Error::InvalidQuestionPool(_))
        ));
        assert!(QuestionPool::from_json(r#"{"nope": 1}"#).is_err());
    }
}
