/// Constants used throughout the handoff codebase
// Prefix rule applied by the callee
pub const PREFIX_LIMIT: usize = 15;

// Self-test fixtures
pub const FIXTURE_MULTIBYTE_INPUT: &str = "极客幼稚园是一个不错的微信公众号";
pub const FIXTURE_MULTIBYTE_EXPECTED: &str = "极客幼稚园";
pub const FIXTURE_ASCII_INPUT: &str = "Datafuse Lab";
pub const FIXTURE_ASCII_EXPECTED: &str = "Datafuse Lab";

// Scalar passthrough fixture
pub const SCALAR_ARG_U8: u8 = 123;
pub const SCALAR_ARG_U16: u16 = 1234;
pub const SCALAR_ARG_U32: u32 = 1_234_567;
pub const SCALAR_EXPECTED_SUM: usize = 1_235_924;

// Harness defaults
pub const DEFAULT_ITERATIONS: usize = 100;

// Environment variable names
pub const HANDOFF_ITERATIONS_VAR: &str = "HANDOFF_ITERATIONS";
pub const HANDOFF_CONVENTIONS_VAR: &str = "HANDOFF_CONVENTIONS";
