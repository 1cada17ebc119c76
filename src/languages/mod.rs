//! Language definitions used by the heuristic build pack pass
//!
//! A language maps source file extensions to the build pack that handles it.
//! The table is intentionally data-only: languages with a dedicated marker
//! file (Maven, Gradle) are resolved long before the heuristic runs.

mod registry;

pub use registry::LanguageRegistry;

/// Trait defining how a language is recognised and which pack builds it
pub trait LanguageDefinition: Send + Sync {
    /// Language name (e.g., "Go", "JavaScript")
    fn name(&self) -> &str;

    /// File extensions associated with this language, without the dot
    fn extensions(&self) -> &[&str];

    /// Directory name of the build pack for this language
    fn pack_name(&self) -> &str;
}

/// Table-backed language definition
#[derive(Debug, Clone, Copy)]
pub struct StaticLanguage {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub pack: &'static str,
}

impl LanguageDefinition for StaticLanguage {
    fn name(&self) -> &str {
        self.name
    }

    fn extensions(&self) -> &[&str] {
        self.extensions
    }

    fn pack_name(&self) -> &str {
        self.pack
    }
}

pub const GO: StaticLanguage = StaticLanguage {
    name: "Go",
    extensions: &["go"],
    pack: "go",
};

pub const PYTHON: StaticLanguage = StaticLanguage {
    name: "Python",
    extensions: &["py"],
    pack: "python",
};

pub const JAVASCRIPT: StaticLanguage = StaticLanguage {
    name: "JavaScript",
    extensions: &["js", "jsx", "mjs", "cjs"],
    pack: "javascript",
};

pub const TYPESCRIPT: StaticLanguage = StaticLanguage {
    name: "TypeScript",
    extensions: &["ts", "tsx"],
    pack: "typescript",
};

pub const RUST: StaticLanguage = StaticLanguage {
    name: "Rust",
    extensions: &["rs"],
    pack: "rust",
};

pub const CSHARP: StaticLanguage = StaticLanguage {
    name: "C#",
    extensions: &["cs"],
    pack: "csharp",
};

pub const RUBY: StaticLanguage = StaticLanguage {
    name: "Ruby",
    extensions: &["rb"],
    pack: "ruby",
};

pub const PHP: StaticLanguage = StaticLanguage {
    name: "PHP",
    extensions: &["php"],
    pack: "php",
};

pub const SCALA: StaticLanguage = StaticLanguage {
    name: "Scala",
    extensions: &["scala", "sc"],
    pack: "scala",
};

pub const SWIFT: StaticLanguage = StaticLanguage {
    name: "Swift",
    extensions: &["swift"],
    pack: "swift",
};

pub const CPP: StaticLanguage = StaticLanguage {
    name: "C++",
    extensions: &["cpp", "cc", "cxx", "hpp", "hh"],
    pack: "C++",
};

pub const D: StaticLanguage = StaticLanguage {
    name: "D",
    extensions: &["d"],
    pack: "D",
};

// Plain sources without a pom.xml or build.gradle still build with the JVM packs.
pub const JAVA: StaticLanguage = StaticLanguage {
    name: "Java",
    extensions: &["java"],
    pack: "maven",
};

pub const KOTLIN: StaticLanguage = StaticLanguage {
    name: "Kotlin",
    extensions: &["kt", "kts"],
    pack: "gradle",
};
