use heck::ToSnakeCase;

/// Split a run-together identifier into lowercase, underscore-joined words.
///
/// Input without a recognizable capitalized segment is only lowercased.
pub fn snake_case(input: &str) -> String {
	input.to_snake_case()
}
