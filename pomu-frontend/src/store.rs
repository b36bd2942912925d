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

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slab::Slab;

type Subscriber<T> = Rc<dyn Fn(&Rc<T>)>;

struct StoreInner<T> {
    value: RefCell<Rc<T>>,
    subscribers: RefCell<Slab<Subscriber<T>>>,
}

/// An observable value shared between the state layer and the UI
///
/// Cloning a `Store` clones the handle, not the value.
/// Every mutation replaces the stored `Rc`, so a snapshot returned by [`Store::get`]
/// never changes under its holder.
pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T> PartialEq for Store<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for Store<T> {}

impl<T: Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                value: RefCell::new(Rc::new(value)),
                subscribers: RefCell::new(Slab::new()),
            }),
        }
    }

    pub fn get(&self) -> Rc<T> {
        self.inner.value.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = Rc::new(value);
        self.notify();
    }

    /// Mutates the value in place, cloning it first if a snapshot of it is still held somewhere
    ///
    /// The mutator must not access this store.
    pub fn update<F>(&self, mutator: F)
    where
        F: FnOnce(&mut T),
        T: Clone,
    {
        {
            let mut value = self.inner.value.borrow_mut();
            mutator(Rc::make_mut(&mut value));
        }
        self.notify();
    }

    /// Registers a callback, calling it immediately with the current value
    /// and again after every change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where F: Fn(&Rc<T>) + 'static,
    {
        let callback: Subscriber<T> = Rc::new(callback);
        let key = self.inner.subscribers.borrow_mut().insert(callback.clone());
        callback(&self.get());

        let inner = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || remove_subscriber(&inner, key))),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self) {
        let value = self.get();
        // callbacks may subscribe or unsubscribe, so don't hold the borrow while calling them
        let subscribers: Vec<Subscriber<T>> = self.inner.subscribers.borrow().iter().map(|(_, cb)| cb.clone()).collect();
        for callback in subscribers {
            callback(&value);
        }
    }
}

fn remove_subscriber<T>(inner: &Weak<StoreInner<T>>, key: usize) {
    if let Some(inner) = inner.upgrade() {
        inner.subscribers.borrow_mut().try_remove(key);
    }
}

/// Keeps a [`Store`] callback registered
///
/// Automatically unsubscribed when this object is dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
