// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pretty JSON rendering of decoded information elements.
//!
//! ## Example
//!
//! ```
//! use rrc_per::encoding::json::JsonWriter;
//!
//! let mut j = JsonWriter::new();
//! j.start_obj();
//! j.write_int("p-C-r13", -8);
//! j.write_str("bf-k1a-r13", "1010");
//! j.end_obj();
//! assert_eq!(
//!     j.to_string(),
//!     "{\n  \"p-C-r13\": -8,\n  \"bf-k1a-r13\": \"1010\"\n}"
//! );
//! ```

use std::fmt;

/// Types that render themselves into a [`JsonWriter`].
pub trait ToJson {
    /// Write `self` as the next value.
    fn to_json(&self, j: &mut JsonWriter);
}

/// Render `value` as a standalone JSON document.
pub fn to_json_string<T: ToJson + ?Sized>(value: &T) -> String {
    let mut j = JsonWriter::new();
    value.to_json(&mut j);
    j.into_string()
}

/// What goes before the next value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    None,
    Comma,
    Newline,
}

/// Streaming writer producing JSON with two-space indentation.
///
/// Every `write_*` call takes a field name; an empty name writes a bare
/// value, as needed inside arrays or at the top level.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    buffer: String,
    depth: usize,
    sep: Separator,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            sep: Separator::None,
        }
    }

    fn newline(&mut self) {
        self.buffer.push('\n');
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
    }

    fn push_quoted(&mut self, s: &str) {
        match serde_json::to_string(s) {
            Ok(quoted) => self.buffer.push_str(&quoted),
            Err(_) => {
                self.buffer.push('"');
                self.buffer.push_str(s);
                self.buffer.push('"');
            }
        }
    }

    /// Start the next value, preceded by `"fieldname": ` when the name is not empty.
    pub fn write_fieldname(&mut self, fieldname: &str) {
        match self.sep {
            Separator::Comma => {
                self.buffer.push(',');
                self.newline();
            }
            Separator::Newline => self.newline(),
            Separator::None => {}
        }
        if !fieldname.is_empty() {
            self.push_quoted(fieldname);
            self.buffer.push_str(": ");
        }
        self.sep = Separator::None;
    }

    /// Write a string value.
    pub fn write_str(&mut self, fieldname: &str, value: &str) {
        self.write_fieldname(fieldname);
        self.push_quoted(value);
        self.sep = Separator::Comma;
    }

    /// Write an integer value.
    pub fn write_int(&mut self, fieldname: &str, value: impl Into<i128>) {
        self.write_fieldname(fieldname);
        self.buffer.push_str(&value.into().to_string());
        self.sep = Separator::Comma;
    }

    /// Write a boolean value.
    pub fn write_bool(&mut self, fieldname: &str, value: bool) {
        self.write_fieldname(fieldname);
        self.buffer.push_str(if value { "true" } else { "false" });
        self.sep = Separator::Comma;
    }

    /// Write `null`.
    pub fn write_null(&mut self, fieldname: &str) {
        self.write_fieldname(fieldname);
        self.buffer.push_str("null");
        self.sep = Separator::Comma;
    }

    /// Open an object. Call [`write_fieldname`](Self::write_fieldname) first to name it.
    pub fn start_obj(&mut self) {
        if self.sep != Separator::None {
            self.write_fieldname("");
        }
        self.buffer.push('{');
        self.depth += 1;
        self.sep = Separator::Newline;
    }

    /// Close the innermost object.
    pub fn end_obj(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.newline();
        self.buffer.push('}');
        self.sep = Separator::Comma;
    }

    /// Open an array. Call [`write_fieldname`](Self::write_fieldname) first to name it.
    pub fn start_array(&mut self) {
        if self.sep != Separator::None {
            self.write_fieldname("");
        }
        self.buffer.push('[');
        self.depth += 1;
        self.sep = Separator::Newline;
    }

    /// Close the innermost array.
    pub fn end_array(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.newline();
        self.buffer.push(']');
        self.sep = Separator::Comma;
    }

    /// Consume the writer and return the text.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl fmt::Display for JsonWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

impl ToJson for bool {
    fn to_json(&self, j: &mut JsonWriter) {
        j.write_bool("", *self);
    }
}

impl ToJson for () {
    fn to_json(&self, j: &mut JsonWriter) {
        j.write_null("");
    }
}

macro_rules! impl_to_json_int {
    ($($ty:ty),+) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self, j: &mut JsonWriter) {
                    j.write_int("", *self);
                }
            }
        )+
    };
}

impl_to_json_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_array();
        for item in self {
            item.to_json(j);
        }
        j.end_array();
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self, j: &mut JsonWriter) {
        (**self).to_json(j);
    }
}
