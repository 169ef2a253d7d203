// Copyright (C) 2025 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

use minidom::Element;

/// Get the `fill` values of an [Element](minidom::Element), whether they come
/// from the `fill` attribute or from a `fill:` declaration in the `style`
/// attribute
pub trait Fill {
    /// `fill` values of this element only: the `fill` attribute first, then
    /// the declarations of the `style` attribute
    fn fill_values(&self) -> Vec<&str>;

    /// `fill` values of this element and all its descendants, in document
    /// order
    fn deep_fill_values(&self) -> Vec<&str>;
}

fn style_fill_values(style: &str) -> impl Iterator<Item = &str> {
    style.split(';').filter_map(|declaration| {
        let mut property = declaration.splitn(2, ':');
        let name = property.next()?.trim();
        let value = property.next()?.trim();
        if name.eq_ignore_ascii_case("fill") && !value.is_empty() {
            Some(value)
        } else {
            None
        }
    })
}

impl Fill for Element {
    fn fill_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self
            .attr("fill")
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .into_iter()
            .collect();
        if let Some(style) = self.attr("style") {
            values.extend(style_fill_values(style));
        }
        values
    }

    fn deep_fill_values(&self) -> Vec<&str> {
        let mut values = self.fill_values();
        for child in self.children() {
            values.extend(child.deep_fill_values());
        }
        values
    }
}
