//! Small standalone helpers unrelated to the review service.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ToolboxError {
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl FromStr for Op {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Op::Add),
            "-" => Ok(Op::Sub),
            "*" => Ok(Op::Mul),
            "/" => Ok(Op::Div),
            other => Err(ToolboxError::UnknownOperator(other.to_string())),
        }
    }
}

pub fn calculate(a: f64, b: f64, op: Op) -> Result<f64, ToolboxError> {
    match op {
        Op::Add => Ok(a + b),
        Op::Sub => Ok(a - b),
        Op::Mul => Ok(a * b),
        Op::Div if b == 0.0 => Err(ToolboxError::DivisionByZero),
        Op::Div => Ok(a / b),
    }
}

/// Trimmed lines of a text file. Empty lines are dropped; a line holding
/// only whitespace is kept as `""`.
pub fn read_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let data = fs::read_to_string(path)?;
    Ok(data
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| line.trim().to_string())
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataManager<T> {
    data: Vec<T>,
}

impl<T> Default for DataManager<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> DataManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.data.push(item);
    }

    pub fn all(&self) -> &[T] {
        &self.data
    }
}

#[derive(Debug, Default)]
pub struct Counter {
    value: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) -> u64 {
        self.value += 1;
        self.value
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}
