//! Fake data provider handed to dynamic generators.
//!
//! The seeder only passes [`FakeData`] through to generators; it never reads
//! from it.

use std::ops::Range;

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use serde_json::Value;

/// Kinds of fake values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakerType {
	/// Safe email address (example.com/org/net).
	Email,
	/// Login name.
	Username,
	/// Given name.
	FirstName,
	/// Family name.
	LastName,
	/// Full name.
	Name,
	/// Single lorem word.
	Word,
	/// Lorem sentence.
	Sentence,
	/// Lorem paragraph.
	Paragraph,
	/// Company name.
	CompanyName,
	/// City name.
	City,
	/// Phone number.
	PhoneNumber,
	/// Boolean, true half of the time.
	Boolean,
}

impl FakerType {
	/// Generates a value of this kind.
	pub fn generate(&self) -> Value {
		match self {
			Self::Email => Value::String(SafeEmail().fake()),
			Self::Username => Value::String(Username().fake()),
			Self::FirstName => Value::String(FirstName().fake()),
			Self::LastName => Value::String(LastName().fake()),
			Self::Name => Value::String(Name().fake()),
			Self::Word => Value::String(Word().fake()),
			Self::Sentence => Value::String(Sentence(4..10).fake()),
			Self::Paragraph => Value::String(Paragraph(3..6).fake()),
			Self::CompanyName => Value::String(CompanyName().fake()),
			Self::City => Value::String(CityName().fake()),
			Self::PhoneNumber => Value::String(PhoneNumber().fake()),
			Self::Boolean => Value::Bool(Boolean(50).fake()),
		}
	}
}

/// Fake data provider passed to every dynamic generator call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeData;

impl FakeData {
	/// Creates a provider.
	pub fn new() -> Self {
		Self
	}

	/// Generates a value of the given kind.
	pub fn generate(&self, kind: FakerType) -> Value {
		kind.generate()
	}

	/// Safe email address.
	pub fn email(&self) -> String {
		SafeEmail().fake()
	}

	/// Login name.
	pub fn username(&self) -> String {
		Username().fake()
	}

	/// Full name.
	pub fn name(&self) -> String {
		Name().fake()
	}

	/// `count` lorem words joined by spaces.
	pub fn words(&self, count: usize) -> String {
		(0..count)
			.map(|_| Word().fake::<String>())
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Lorem sentence.
	pub fn sentence(&self) -> String {
		Sentence(4..10).fake()
	}

	/// Integer in `range`; an empty range yields its start.
	pub fn number(&self, range: Range<i64>) -> i64 {
		if range.is_empty() {
			return range.start;
		}
		range.fake()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_email_contains_at() {
		let email = FakeData::new().email();
		assert!(email.contains('@'));
	}

	#[rstest]
	#[case(0)]
	#[case(1)]
	#[case(5)]
	fn test_words_count(#[case] count: usize) {
		let words = FakeData::new().words(count);
		assert_eq!(words.split_whitespace().count(), count);
	}

	#[rstest]
	fn test_number_in_range() {
		let faker = FakeData::new();
		for _ in 0..20 {
			let n = faker.number(10..20);
			assert!((10..20).contains(&n));
		}
	}

	#[rstest]
	#[case(7..7)]
	#[case(-3..-3)]
	fn test_number_empty_range_returns_start(#[case] range: Range<i64>) {
		let start = range.start;
		assert_eq!(FakeData::new().number(range), start);
	}

	#[rstest]
	#[case(FakerType::Email)]
	#[case(FakerType::Sentence)]
	#[case(FakerType::City)]
	fn test_generate_string_kinds(#[case] kind: FakerType) {
		assert!(kind.generate().is_string());
	}

	#[rstest]
	fn test_generate_boolean() {
		assert!(FakerType::Boolean.generate().is_boolean());
	}
}
