/* This file is part of the pomu project
*
*  Copyright (C) 2024-2025 pomu contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use std::{ops::Deref, rc::Rc};

use chrono::{DateTime, Utc};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn render_datetime(dt: DateTime<Utc>) -> String {
    format!("{} UTC", dt.format(TIME_FORMAT))
}

/// Render a file size in decimal units:
/// whole megabytes below 1 GB, gigabytes with a single decimal above
#[allow(clippy::cast_precision_loss)]
pub fn render_file_size(size_bytes: u64) -> String {
    let mb_size = size_bytes as f64 / (1000. * 1000.);
    let gb_size = mb_size / 1000.;

    if gb_size < 1. {
        format!("{} MB", mb_size.round())
    } else {
        format!("{gb_size:.1} GB")
    }
}

/// Wrapper type for comparing Rc's via their addresses
pub struct RcEq<T: ?Sized>(pub Rc<T>);

impl<T: ?Sized> PartialEq for RcEq<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl<T: ?Sized> Eq for RcEq<T> {}

impl<T: ?Sized> Deref for RcEq<T> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for RcEq<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> From<T> for RcEq<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> RcEq<T> {
    pub fn new(val: T) -> Self {
        Self(Rc::new(val))
    }
}
