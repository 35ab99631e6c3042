// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixture values shared by the workspace tests.
//!
//! Besides plain people and animals, the fixtures describe a small family tree
//! (Alice → Bob, Charlie; Bob → Dave; Charlie → Diane) used to exercise recursive
//! expansion.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    #[must_use]
    pub const fn new(name: String, age: u32) -> Self {
        Self { name, age }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Animal {
    pub name: String,
    pub legs: u32,
}

impl Animal {
    #[must_use]
    pub const fn new(name: String, legs: u32) -> Self {
        Self { name, legs }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestData {
    Person(Person),
    Animal(Animal),
}

impl TestData {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TestData::Person(p) => &p.name,
            TestData::Animal(a) => &a.name,
        }
    }
}

impl Display for TestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestData::Person(p) => write!(f, "Person[name={}, age={}]", p.name, p.age),
            TestData::Animal(a) => write!(f, "Animal[name={}, legs={}]", a.name, a.legs),
        }
    }
}

pub fn person(name: &str, age: u32) -> TestData {
    TestData::Person(Person::new(name.to_string(), age))
}

pub fn animal(name: &str, legs: u32) -> TestData {
    TestData::Animal(Animal::new(name.to_string(), legs))
}

pub fn person_alice() -> TestData {
    person("Alice", 65)
}

pub fn person_bob() -> TestData {
    person("Bob", 40)
}

pub fn person_charlie() -> TestData {
    person("Charlie", 35)
}

pub fn person_dave() -> TestData {
    person("Dave", 12)
}

pub fn person_diane() -> TestData {
    person("Diane", 8)
}

pub fn animal_dog() -> TestData {
    animal("Dog", 4)
}

pub fn animal_spider() -> TestData {
    animal("Spider", 8)
}

pub fn animal_bird() -> TestData {
    animal("Bird", 2)
}

/// Direct descendants of `parent` in the fixture family tree.
pub fn children_of(parent: &TestData) -> Vec<TestData> {
    match parent.name() {
        "Alice" => vec![person_bob(), person_charlie()],
        "Bob" => vec![person_dave()],
        "Charlie" => vec![person_diane()],
        _ => Vec::new(),
    }
}
