//! Bitmap-accelerated intersection and union over posting lists.
//!
//! A document id `d` lives in compartment `d / 64` at bit `d % 64`. The
//! compartment array is sized from the corpus, and any id at or past that
//! capacity is reported as a [`CapacityViolation`] instead of being dropped.

use crate::{CapacityViolation, DocId};
use serde::{Deserialize, Serialize};

/// Bits per compartment.
pub const COMPARTMENT_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Documents containing every known query term.
    #[default]
    And,
    /// Documents containing at least one query term.
    Or,
}

#[derive(Debug, Clone)]
pub struct Bitmap {
    compartments: Vec<u64>,
    capacity: usize,
}

impl Bitmap {
    /// Room for ids in `[0, capacity)`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { compartments: vec![0; capacity.div_ceil(COMPARTMENT_BITS)], capacity }
    }

    pub fn capacity(&self) -> usize { self.capacity }

    #[inline]
    fn locate(&self, doc_id: DocId) -> Result<(usize, u64), CapacityViolation> {
        let d = doc_id as usize;
        if d >= self.capacity {
            return Err(CapacityViolation { doc_id, capacity: self.capacity });
        }
        Ok((d / COMPARTMENT_BITS, 1u64 << (d % COMPARTMENT_BITS)))
    }

    /// Sets the bit and returns whether it was already set.
    pub fn insert(&mut self, doc_id: DocId) -> Result<bool, CapacityViolation> {
        let (idx, mask) = self.locate(doc_id)?;
        let was_set = self.compartments[idx] & mask != 0;
        self.compartments[idx] |= mask;
        Ok(was_set)
    }

    pub fn contains(&self, doc_id: DocId) -> Result<bool, CapacityViolation> {
        let (idx, mask) = self.locate(doc_id)?;
        Ok(self.compartments[idx] & mask != 0)
    }

    pub fn clear(&mut self) {
        self.compartments.iter_mut().for_each(|c| *c = 0);
    }
}

/// Set algebra over posting lists for a corpus of `capacity` documents.
#[derive(Debug, Clone, Copy)]
pub struct SetAlgebra {
    capacity: usize,
}

impl SetAlgebra {
    pub fn new(capacity: usize) -> Self { Self { capacity } }

    pub fn capacity(&self) -> usize { self.capacity }

    /// Elements of `b` that also occur in `a`, in `b`'s order.
    pub fn intersection(&self, a: &[DocId], b: &[DocId]) -> Result<Vec<DocId>, CapacityViolation> {
        let mut bitmap = Bitmap::with_capacity(self.capacity);
        intersect_with(&mut bitmap, a, b)
    }

    /// All of `a`, then the elements of `b` not in `a`, in `b`'s order.
    pub fn union(&self, a: &[DocId], b: &[DocId]) -> Result<Vec<DocId>, CapacityViolation> {
        let mut bitmap = Bitmap::with_capacity(self.capacity);
        union_with(&mut bitmap, a, b)
    }

    /// Left fold of `op` over the lists. `None` entries are terms missing
    /// from the index and are skipped; an all-`None` input gives an empty result.
    pub fn fold<'a, I>(&self, lists: I, op: Operator) -> Result<Vec<DocId>, CapacityViolation>
    where
        I: IntoIterator<Item = Option<&'a [DocId]>>,
    {
        let mut scratch: Option<Bitmap> = None;
        let mut acc: Option<Vec<DocId>> = None;
        for list in lists.into_iter().flatten() {
            let Some(current) = acc.take() else {
                acc = Some(list.to_vec());
                continue;
            };
            let bitmap = scratch.get_or_insert_with(|| Bitmap::with_capacity(self.capacity));
            bitmap.clear();
            acc = Some(match op {
                Operator::And => intersect_with(bitmap, &current, list)?,
                Operator::Or => union_with(bitmap, &current, list)?,
            });
        }
        Ok(acc.unwrap_or_default())
    }
}

fn intersect_with(bitmap: &mut Bitmap, a: &[DocId], b: &[DocId]) -> Result<Vec<DocId>, CapacityViolation> {
    for &d in a {
        bitmap.insert(d)?;
    }
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    for &d in b {
        if bitmap.contains(d)? {
            out.push(d);
        }
    }
    Ok(out)
}

fn union_with(bitmap: &mut Bitmap, a: &[DocId], b: &[DocId]) -> Result<Vec<DocId>, CapacityViolation> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    for &d in a {
        bitmap.insert(d)?;
        out.push(d);
    }
    for &d in b {
        if !bitmap.contains(d)? {
            out.push(d);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(v: &[DocId]) -> BTreeSet<DocId> { v.iter().copied().collect() }

    #[test]
    fn intersection_keeps_common_ids_in_b_order() {
        let alg = SetAlgebra::new(200);
        assert_eq!(alg.intersection(&[0, 4], &[0, 1]).unwrap(), vec![0]);
        assert_eq!(alg.intersection(&[3, 63, 64, 130], &[130, 64, 5]).unwrap(), vec![130, 64]);
        assert!(alg.intersection(&[1, 2], &[3, 4]).unwrap().is_empty());
    }

    #[test]
    fn union_keeps_a_then_novel_b() {
        let alg = SetAlgebra::new(200);
        assert_eq!(alg.union(&[0, 4], &[0, 1]).unwrap(), vec![0, 4, 1]);
        assert_eq!(alg.union(&[], &[7, 8]).unwrap(), vec![7, 8]);
    }

    #[test]
    fn set_identities_hold() {
        let alg = SetAlgebra::new(1000);
        let a: Vec<DocId> = (0..1000).step_by(3).collect();
        let b: Vec<DocId> = (0..1000).step_by(5).collect();
        let ab = alg.intersection(&a, &b).unwrap();
        let ba = alg.intersection(&b, &a).unwrap();
        assert_eq!(set(&ab), set(&ba));
        let u_ab = alg.union(&a, &b).unwrap();
        let u_ba = alg.union(&b, &a).unwrap();
        assert_eq!(set(&u_ab), set(&u_ba));
        assert_eq!(u_ab.len(), a.len() + b.len() - ab.len());
        assert_eq!(set(&u_ab).len(), u_ab.len());
    }

    #[test]
    fn id_past_capacity_is_reported() {
        let alg = SetAlgebra::new(64);
        let err = alg.intersection(&[1, 64], &[1]).unwrap_err();
        assert_eq!(err, CapacityViolation { doc_id: 64, capacity: 64 });
        let err = alg.union(&[1], &[2, 100]).unwrap_err();
        assert_eq!(err.doc_id, 100);
    }

    #[test]
    fn compartment_boundaries() {
        let mut bm = Bitmap::with_capacity(129);
        for d in [0, 63, 64, 127, 128] {
            assert!(!bm.insert(d).unwrap());
            assert!(bm.insert(d).unwrap());
        }
        assert!(!bm.contains(65).unwrap());
        assert!(bm.contains(128).unwrap());
        assert!(bm.contains(129).is_err());
        bm.clear();
        assert!(!bm.contains(64).unwrap());
    }

    #[test]
    fn fold_skips_missing_terms() {
        let alg = SetAlgebra::new(10);
        let a: &[DocId] = &[1, 2, 3];
        let b: &[DocId] = &[2, 3, 4];
        assert_eq!(alg.fold([Some(a), None, Some(b)], Operator::And).unwrap(), vec![2, 3]);
        assert_eq!(alg.fold([None, Some(a)], Operator::And).unwrap(), vec![1, 2, 3]);
        assert_eq!(alg.fold([Some(a), None, Some(b)], Operator::Or).unwrap(), vec![1, 2, 3, 4]);
        assert!(alg.fold([None, None], Operator::Or).unwrap().is_empty());
    }

    #[test]
    fn empty_intersection_is_not_reseeded() {
        let alg = SetAlgebra::new(10);
        let a: &[DocId] = &[1];
        let b: &[DocId] = &[2];
        let c: &[DocId] = &[2, 3];
        assert!(alg.fold([Some(a), Some(b), Some(c)], Operator::And).unwrap().is_empty());
    }

    #[test]
    fn operator_parses_lowercase() {
        let op: Operator = serde_json::from_str("\"or\"").unwrap();
        assert_eq!(op, Operator::Or);
        assert_eq!(Operator::default(), Operator::And);
    }
}
