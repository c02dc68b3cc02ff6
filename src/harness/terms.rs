//! Curated English query terms for search quality runs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::TermCategory;

/// Term lists keyed by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestTerms {
    pub valid_terms: Vec<String>,
    pub invalid_terms: Vec<String>,
    pub edge_cases: Vec<String>,
}

impl TestTerms {
    /// The built-in dataset
    pub fn builtin() -> Self {
        let owned = |terms: &[&str]| -> Vec<String> { terms.iter().map(|t| t.to_string()).collect() };
        Self {
            valid_terms: owned(VALID_TERMS),
            invalid_terms: owned(INVALID_TERMS),
            edge_cases: owned(EDGE_CASES),
        }
    }

    /// Load custom term lists; absent categories are empty
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read terms file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse terms file {}", path.display()))
    }

    pub fn get(&self, category: TermCategory) -> &[String] {
        match category {
            TermCategory::ValidTerms => &self.valid_terms,
            TermCategory::InvalidTerms => &self.invalid_terms,
            TermCategory::EdgeCases => &self.edge_cases,
        }
    }

    pub fn total(&self) -> usize {
        TermCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

const VALID_TERMS: &[&str] = &[
    // nouns
    "time", "person", "year", "way", "day", "thing", "man", "world", "life", "hand",
    "part", "child", "eye", "woman", "place", "work", "week", "case", "point", "government",
    "company", "number", "group", "problem", "fact", "water", "money", "story", "month", "book",
    "system", "program", "question", "right", "business", "issue", "side", "area", "information", "house",
    "family", "health", "school", "service", "room", "name", "research", "community", "level", "state",
    // verbs
    "make", "take", "come", "give", "look", "use", "find", "want", "work", "call",
    "try", "ask", "need", "feel", "become", "leave", "move", "play", "turn", "start",
    "show", "hear", "talk", "provide", "allow", "include", "continue", "follow", "learn", "change",
    "lead", "understand", "watch", "stop", "create", "speak", "read", "spend", "grow", "open",
    "walk", "win", "build", "teach", "offer", "remember", "consider", "appear", "buy", "serve",
    // adjectives
    "good", "new", "first", "last", "long", "great", "little", "own", "other", "old",
    "right", "big", "high", "different", "small", "large", "next", "early", "young", "important",
    "few", "public", "bad", "same", "able", "local", "sure", "human", "far", "open",
    "white", "real", "best", "possible", "social", "available", "free", "special", "clear", "black",
    "whole", "medical", "common", "hard", "simple", "recent", "strong", "easy", "ready", "natural",
    // site vocabulary
    "home", "page", "website", "search", "help", "support", "contact", "about", "news", "blog",
    "login", "register", "profile", "account", "settings", "privacy", "terms", "policy", "subscribe", "download",
    "email", "phone", "address", "location", "map", "directions", "hours", "menu", "prices", "events",
    "gallery", "photos", "images", "video", "audio", "documents", "resources", "links", "tools", "services",
];

const INVALID_TERMS: &[&str] = &[
    // keyboard runs
    "asdf", "qwerty", "zxcv", "hjkl", "poiu", "mnbv", "lkjh", "qaze", "wsdx", "edcr",
    "rfvt", "tgby", "yhnu", "ujmi", "ikol", "olpk", "plmn", "xzaq", "cdev", "vfrt",
    // nonsense
    "xyzt", "qwxz", "zqpx", "mvnx", "bklz", "jpqx", "wxyz", "qpzm", "xlnv", "ztpq",
    "mnkj", "bgtr", "hylp", "qzwx", "xvnm", "plkj", "zxyw", "qmwn", "bvnx", "zyxw",
    // affixes
    "ing", "tion", "ness", "ment", "able", "ible", "ful", "less", "ous", "ive",
    "ize", "ise", "age", "ery", "ary", "ity", "ify", "ure", "ite", "ate",
    "pre", "pro", "anti", "over", "under", "out", "super", "sub", "inter", "non",
    // one to three characters
    "x", "z", "q", "j", "xx", "zz", "qq", "jj", "xxx", "zzz",
    // misspellings
    "teh", "adn", "recieve", "seperate", "occured", "neccessary", "begining", "sucess", "writting", "freind",
    "diffrent", "usualy", "everthing", "somthing", "comming", "goverment", "busines", "proffesional", "managment", "develope",
    "beleive", "truely", "finaly", "basicaly", "orignal", "similiar", "definitly", "realy", "actualy", "generaly",
    // reversed words
    "ecneidua", "tnetnoc", "egami", "txet", "noitamrofni", "ecivres", "tcudorp", "swen", "yrots", "eman",
    // mixed case nonsense
    "aBcDe", "XyZaB", "QwErT", "mNbVc", "pLkJh", "zXcVb", "rTyUi", "dFgHj", "sAlKd", "wEqAz",
];

const EDGE_CASES: &[&str] = &[
    // whitespace
    "", " ", "  ", "\t", "\n", "\r", "   ", "\t\n", " \t ", "\r\n",
    // very short
    "a", "i", "I", "o", "u", "e", "y", "ab", "it", "is", "to", "of", "at", "on", "in", "be", "or", "an", "as", "by",
    // stop words
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one", "our", "out", "day",
    "get", "has", "him", "his", "how", "its", "may", "new", "now", "old", "see", "two", "who", "boy", "did", "man",
    // casing
    "TEST", "Test", "test", "tEsT", "HOME", "Home", "home", "hOmE",
    "SEARCH", "Search", "search", "sEaRcH", "CONTENT", "Content", "content", "cOnTeNt",
    // numbers
    "1", "2", "10", "100", "1000", "2023", "2024", "2025", "123", "456", "789",
    "page1", "item2", "section3", "chapter4", "part5", "step6", "level7", "phase8", "stage9", "round10",
    // symbols
    "@", "#", "$", "%", "&", "*", "!", "?", ".", ",", ";", ":", "|", "\\", "/", "-", "_", "+", "=",
    "test@", "#test", "$test", "test%", "test&", "test*", "test!", "test?", "test.", "test,",
    // phrases
    "hello world", "test case", "user name", "web site", "home page", "contact us", "about us", "sign up",
    "log in", "check out", "find out", "learn more", "get started", "try now", "click here", "read more",
    // separators
    "user-name", "user_name", "web-site", "web_site", "home-page", "home_page", "check-out", "check_out",
    "sign-up", "sign_up", "log-in", "log_in", "e-mail", "e_mail", "real-time", "real_time",
    // very long
    "supercalifragilisticexpialidocious", "pneumonoultramicroscopicsilicovolcanoconiosis",
    "antidisestablishmentarianism", "floccinaucinihilipilification", "pseudopseudohypoparathyroidism",
    "verylongterminatenglishlanguagethatprobablywontmatchanything", "extremelylongcompoundwordwithoutspaces",
    // accented
    "café", "naïve", "résumé", "piña", "jalapeño", "über", "façade", "cliché", "fiancé", "protégé",
    // file extensions
    "jpg", "png", "gif", "pdf", "doc", "txt", "html", "css", "js", "json", "xml", "csv",
    // url fragments
    "www", "com", "org", "net", "edu", "gov", "http", "https", "ftp", "mailto",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_sizes() {
        let terms = TestTerms::builtin();
        assert_eq!(terms.valid_terms.len(), 200);
        assert_eq!(terms.invalid_terms.len(), 130);
        assert!(terms.edge_cases.len() > 150);
        assert_eq!(
            terms.total(),
            terms.valid_terms.len() + terms.invalid_terms.len() + terms.edge_cases.len()
        );
    }

    #[test]
    fn test_load_partial_terms_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.json");
        fs::write(&path, r#"{ "validTerms": ["home", "blog"] }"#).unwrap();

        let terms = TestTerms::load(&path).unwrap();
        assert_eq!(terms.get(TermCategory::ValidTerms), ["home", "blog"]);
        assert!(terms.get(TermCategory::EdgeCases).is_empty());
    }
}
