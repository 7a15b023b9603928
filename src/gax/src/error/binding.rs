// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A request, or a fluent definition, cannot be turned into an HTTP request.
#[derive(thiserror::Error, Debug, PartialEq)]
pub struct BindingError {
    /// Every field that prevented the request from being built.
    pub problems: Vec<FieldMismatch>,
}

impl BindingError {
    pub fn new<T: IntoIterator<Item = FieldMismatch>>(problems: T) -> Self {
        Self {
            problems: problems.into_iter().collect(),
        }
    }

    /// A single missing field.
    pub fn missing(field_name: &'static str) -> Self {
        Self::new([FieldMismatch {
            field_name,
            problem: FieldProblem::Unset,
        }])
    }

    /// A single field with an unexpected value.
    pub fn invalid<V: Into<String>>(
        field_name: &'static str,
        value: V,
        expecting: &'static str,
    ) -> Self {
        Self::new([FieldMismatch {
            field_name,
            problem: FieldProblem::MismatchExpecting(value.into(), expecting),
        }])
    }
}

#[derive(Debug, PartialEq)]
pub enum FieldProblem {
    /// A required field was not set
    Unset,
    /// A required field was set, but to an invalid value
    ///
    /// # Parameters
    ///
    /// - self.0 - the actual value of the field
    /// - self.1 - the expected format of the field
    MismatchExpecting(String, &'static str),
}

#[derive(Debug, PartialEq)]
pub struct FieldMismatch {
    /// The name of the field, nested fields are '.'-separated.
    pub field_name: &'static str,
    /// Why the field is unusable.
    pub problem: FieldProblem,
}

impl std::fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.problem {
            FieldProblem::Unset => write!(f, "field `{}` needs to be set.", self.field_name),
            FieldProblem::MismatchExpecting(actual, expected) => write!(
                f,
                "field `{}` should match: '{}'; found: '{}'",
                self.field_name, expected, actual
            ),
        }
    }
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot build the request: ")?;
        for (i, p) in self.problems.iter().enumerate() {
            if i != 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing() {
        let e = BindingError::missing("resource_group_name");
        assert_eq!(e.problems.len(), 1);
        let fmt = e.problems[0].to_string();
        assert!(fmt.contains("resource_group_name"), "{fmt}");
        assert!(fmt.contains("needs to be set"), "{fmt}");
    }

    #[test]
    fn invalid() {
        let e = BindingError::invalid("priority", "42", "100..=4096");
        let fmt = e.problems[0].to_string();
        assert!(
            fmt.contains("priority") && fmt.contains("42") && fmt.contains("100..=4096"),
            "{fmt}"
        );
        let fmt = e.to_string();
        assert!(fmt.contains("cannot build the request"), "{fmt}");
    }
}
