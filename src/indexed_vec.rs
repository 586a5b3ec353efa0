/// Defines an index new-type together with a vector new-type that can only be
/// indexed by it.
///
/// The index is a dense, zero-based `usize` wrapper. The vector delegates the
/// parts of the `Vec<T>` API an append-only store needs, with `push` handing
/// back the index of the freshly inserted element.
#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        /* ——————————————————— index new‑type ——————————————————— */

        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::convert::From<usize> for $Idx {
            fn from(value: usize) -> Self {
                $Idx(value)
            }
        }

        impl ::std::convert::From<$Idx> for usize {
            fn from(value: $Idx) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $Idx {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        /* ——————————————————— vector new‑type ——————————————————— */

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        /* --- Restricted indexing -------------------------------------------------- */

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        /* --- Delegated Vec<T> API ------------------------------------------------- */

        impl<T> $Vec<T> {
            /* construction */
            #[inline] $vec_vis fn new() -> Self { Self(::std::vec::Vec::new()) }
            #[inline] $vec_vis fn with_capacity(c: usize) -> Self { Self(::std::vec::Vec::with_capacity(c)) }

            /* capacity */
            #[inline] $vec_vis fn len(&self) -> usize { self.0.len() }
            #[inline] $vec_vis fn is_empty(&self) -> bool { self.0.is_empty() }
            #[inline] $vec_vis fn reserve(&mut self, n: usize) { self.0.reserve(n) }

            /* appending; the new element's index is handed back */
            #[inline] $vec_vis fn push(&mut self, value: T) -> $Idx {
                let idx = $Idx(self.0.len());
                self.0.push(value);
                idx
            }

            /* get APIs using the index new‑type */
            #[inline] $vec_vis fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }
            #[inline] $vec_vis fn get_mut(&mut self, idx: $Idx) -> Option<&mut T> { self.0.get_mut(idx.0) }

            /* iteration */
            #[inline] $vec_vis fn iter<'a>(&'a self) -> ::std::iter::Map<::std::iter::Enumerate<::std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)> { self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t)) }
            #[inline] $vec_vis fn iter_mut<'a>(&'a mut self) -> ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::IterMut<'a, T>>,
                fn((usize, &mut T)) -> ($Idx, &mut T),
            > { self.0.iter_mut().enumerate().map(|(u, t)| ($Idx(u), t)) }

            /* fall‑back escape hatch */
            #[inline] $vec_vis fn raw(&self) -> &::std::vec::Vec<T> { &self.0 }
        }

        /* --- standard trait impls ------------------------------------------------- */

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<T> ::std::convert::From<::std::vec::Vec<T>> for $Vec<T> {
            #[inline] fn from(v: ::std::vec::Vec<T>) -> Self { Self(v) }
        }

        impl<T> ::std::iter::IntoIterator for $Vec<T> {
            type Item = ($Idx, T);
            type IntoIter = ::std::iter::Map<::std::iter::Enumerate<::std::vec::IntoIter<T>>, fn((usize, T)) -> ($Idx, T)>;
            #[inline] fn into_iter(self) -> Self::IntoIter { self.0.into_iter().enumerate().map(|(u, t)| ($Idx(u), t)) }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }
    };
}
