//! Common dotenv sources for tests.

// Flat definitions
pub const FLAT: &str = "\
HOST=localhost
PORT=8080
# comment line
NAME=\"demo app\"
";

// Nested references
pub const SIMPLE_REFERENCE: &str = "A=${B}\nB=hello\n";

pub const URL_FROM_PARTS: &str = r#"
SCHEME=https
HOST=example.com
PORT=8443
BASE_URL="${SCHEME}://${HOST}:$PORT"
API_URL=${BASE_URL}/api/v1
"#;

// Circular references
pub const THREE_CYCLE: &str = "A=${B}\nB=${C}\nC=${A}\n";

pub const CYCLE_WITH_BYSTANDERS: &str = r#"
GOOD=fine
LOOP_A=${LOOP_B}
LOOP_B=${LOOP_A}
USES_GOOD=${GOOD}!
"#;

// Undefined references
pub const UNDEFINED: &str = "A=${MISSING}\n";

// Escapes
pub const ESCAPES: &str = r#"
MULTI="line1\nline2"
QUOTE="say \"hi\""
DOLLAR="costs \$5"
RAW='keeps \n and ${HOME}'
"#;

/// `K1=${K2}`, ..., `K{n}=literal`.
pub fn chain(n: usize) -> String {
    let mut source = String::new();
    for i in 1..n {
        source.push_str(&format!("K{i}=${{K{}}}\n", i + 1));
    }
    source.push_str(&format!("K{n}=literal\n"));
    source
}
