//! Dense square transition matrices.

use kolmo_graph::{Class, Graph};

use crate::error::ChainError;

/// A dense `n x n` matrix of transition probabilities.
///
/// Row `i` holds the outgoing distribution of vertex `i + 1`. Storage is
/// row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    n: usize,
    data: Vec<f64>,
}

impl TransitionMatrix {
    /// Returns the `n x n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Returns the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DimensionMismatch`] if any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ChainError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(ChainError::DimensionMismatch {
                    left: n,
                    right: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { n, data })
    }

    /// Materializes the transition matrix of `graph`.
    ///
    /// Each edge writes its probability into its cell. When a vertex lists
    /// the same destination twice, the edge enumerated last (the earliest
    /// one added) is the one kept.
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.n_vertices();
        let mut m = Self::zeros(n);
        for v in 1..=n {
            for e in graph.edges(v) {
                m.data[(v - 1) * n + (e.to - 1)] = e.probability;
            }
        }
        m
    }

    /// Returns the number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns the element at zero-based `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.n && col < self.n, "index ({row}, {col}) out of bounds");
        self.data[row * self.n + col]
    }

    /// Returns zero-based row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact(0) panics, and an empty matrix has no rows anyway.
        self.data.chunks_exact(self.n.max(1))
    }

    /// Returns the transition probability between two 1-based vertices.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::VertexOutOfRange`] for ids outside `1..=n`.
    pub fn prob(&self, from: usize, to: usize) -> Result<f64, ChainError> {
        for vertex in [from, to] {
            if vertex == 0 || vertex > self.n {
                return Err(ChainError::VertexOutOfRange { vertex, n: self.n });
            }
        }
        Ok(self.data[(from - 1) * self.n + (to - 1)])
    }

    /// Computes the product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DimensionMismatch`] if the sizes differ.
    pub fn multiply(&self, other: &Self) -> Result<Self, ChainError> {
        if self.n != other.n {
            return Err(ChainError::DimensionMismatch {
                left: self.n,
                right: other.n,
            });
        }
        let n = self.n;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += self.data[i * n + k] * other.data[k * n + j];
                }
                out.data[i * n + j] = sum;
            }
        }
        Ok(out)
    }

    /// Raises the matrix to the power `k` by repeated multiplication.
    ///
    /// `k = 0` yields the identity; `k = 1` a copy of `self`.
    pub fn power(&self, k: usize) -> Self {
        if k == 0 {
            return Self::identity(self.n);
        }
        let mut result = self.clone();
        for _ in 1..k {
            result = result.mul_same(self);
        }
        result
    }

    /// Returns the L1 distance `sum |self[i][j] - other[i][j]|`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DimensionMismatch`] if the sizes differ.
    pub fn difference(&self, other: &Self) -> Result<f64, ChainError> {
        if self.n != other.n {
            return Err(ChainError::DimensionMismatch {
                left: self.n,
                right: other.n,
            });
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .sum())
    }

    /// Extracts the principal sub-matrix indexed by `class`.
    ///
    /// Rows and columns follow the class's own vertex order.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::ClassOutOfRange`] if a member vertex is not in
    /// `1..=n`.
    pub fn sub_matrix(&self, class: &Class) -> Result<Self, ChainError> {
        let idx: Vec<usize> = class
            .vertices()
            .iter()
            .map(|&v| {
                if v == 0 || v > self.n {
                    Err(ChainError::ClassOutOfRange {
                        class: class.name(),
                        n: self.n,
                    })
                } else {
                    Ok(v - 1)
                }
            })
            .collect::<Result<_, _>>()?;

        let m = idx.len();
        let mut sub = Self::zeros(m);
        for (i, &vi) in idx.iter().enumerate() {
            for (j, &vj) in idx.iter().enumerate() {
                sub.data[i * m + j] = self.data[vi * self.n + vj];
            }
        }
        Ok(sub)
    }

    /// Returns the row-vector product `pi * self`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DimensionMismatch`] if `pi.len() != n`.
    pub fn left_apply(&self, pi: &[f64]) -> Result<Vec<f64>, ChainError> {
        if pi.len() != self.n {
            return Err(ChainError::DimensionMismatch {
                left: pi.len(),
                right: self.n,
            });
        }
        let n = self.n;
        Ok((0..n)
            .map(|j| (0..n).map(|i| pi[i] * self.data[i * n + j]).sum())
            .collect())
    }

    /// Returns the largest L1 distance between row 0 and any other row.
    ///
    /// Zero for matrices with fewer than two rows.
    pub fn row_spread(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let first = self.row(0);
        self.rows()
            .skip(1)
            .map(|r| r.iter().zip(first).map(|(a, b)| (a - b).abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Averages matrices of equal size element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DimensionMismatch`] if the sizes differ, and
    /// [`ChainError::InvalidConfig`] for an empty slice.
    pub fn mean(matrices: &[Self]) -> Result<Self, ChainError> {
        let first = matrices.first().ok_or_else(|| ChainError::InvalidConfig {
            reason: "cannot average zero matrices".to_string(),
        })?;
        let mut acc = Self::zeros(first.n);
        for m in matrices {
            if m.n != first.n {
                return Err(ChainError::DimensionMismatch {
                    left: first.n,
                    right: m.n,
                });
            }
            for (a, b) in acc.data.iter_mut().zip(&m.data) {
                *a += b;
            }
        }
        let count = matrices.len() as f64;
        for a in &mut acc.data {
            *a /= count;
        }
        Ok(acc)
    }

    /// Samples the next vertex from the row of `from` (1-based), walking its
    /// cumulative distribution.
    ///
    /// Returns `None` if the row carries no probability mass. Falls back to
    /// the last vertex with positive mass when rounding leaves the draw
    /// above the cumulative total.
    pub fn sample(&self, from: usize, rng: &mut impl rand::Rng) -> Option<usize> {
        let row = self.row(from - 1);
        let total: f64 = row.iter().sum();
        if total <= 0.0 {
            return None;
        }
        let u: f64 = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last = None;
        for (j, &p) in row.iter().enumerate() {
            if p <= 0.0 {
                continue;
            }
            cumulative += p;
            last = Some(j + 1);
            if cumulative >= u {
                return last;
            }
        }
        last
    }

    /// Multiplies two matrices already known to share a size.
    fn mul_same(&self, other: &Self) -> Self {
        match self.multiply(other) {
            Ok(m) => m,
            Err(_) => unreachable!("operands share size {}", self.n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use kolmo_graph::{ClassId, EdgeSpec};

    fn m(rows: &[&[f64]]) -> TransitionMatrix {
        TransitionMatrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>())
            .unwrap()
    }

    fn weather() -> TransitionMatrix {
        m(&[&[0.5, 0.3, 0.2], &[0.1, 0.7, 0.2], &[0.2, 0.3, 0.5]])
    }

    #[test]
    fn identity_and_zeros() {
        let i = TransitionMatrix::identity(3);
        assert_eq!(i.row(1), &[0.0, 1.0, 0.0]);
        assert!(TransitionMatrix::zeros(2).rows().all(|r| r == [0.0, 0.0]));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = TransitionMatrix::from_rows(&[vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, ChainError::DimensionMismatch { left: 2, right: 1 });
    }

    #[test]
    fn from_graph_places_probabilities() {
        let (g, _) = Graph::build(
            3,
            [
                EdgeSpec::new(1, 2, 0.25),
                EdgeSpec::new(1, 3, 0.75),
                EdgeSpec::new(3, 1, 1.0),
            ],
        );
        let tm = TransitionMatrix::from_graph(&g);
        assert_eq!(tm.size(), 3);
        assert_eq!(tm.row(0), &[0.0, 0.25, 0.75]);
        assert_eq!(tm.row(1), &[0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(tm.prob(3, 1).unwrap(), 1.0);
    }

    #[test]
    fn from_graph_duplicate_keeps_first_added() {
        let (g, _) = Graph::build(2, [EdgeSpec::new(1, 2, 0.4), EdgeSpec::new(1, 2, 0.6)]);
        let tm = TransitionMatrix::from_graph(&g);
        assert_abs_diff_eq!(tm.get(0, 1), 0.4);
    }

    #[test]
    fn prob_out_of_range() {
        let tm = weather();
        assert_eq!(
            tm.prob(0, 1),
            Err(ChainError::VertexOutOfRange { vertex: 0, n: 3 })
        );
        assert_eq!(
            tm.prob(1, 4),
            Err(ChainError::VertexOutOfRange { vertex: 4, n: 3 })
        );
    }

    #[test]
    fn multiply_known_product() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c, m(&[&[19.0, 22.0], &[43.0, 50.0]]));
    }

    #[test]
    fn multiply_dimension_mismatch() {
        let err = weather().multiply(&TransitionMatrix::identity(2)).unwrap_err();
        assert_eq!(err, ChainError::DimensionMismatch { left: 3, right: 2 });
    }

    #[test]
    fn power_zero_and_one() {
        let tm = weather();
        assert_eq!(tm.power(0), TransitionMatrix::identity(3));
        assert_eq!(tm.power(1), tm);
    }

    #[test]
    fn power_matches_repeated_multiply() {
        let tm = weather();
        let p3 = tm.multiply(&tm).unwrap().multiply(&tm).unwrap();
        assert_abs_diff_eq!(tm.power(3).difference(&p3).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn power_preserves_row_sums() {
        let p7 = weather().power(7);
        for row in p7.rows() {
            assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn difference_is_l1() {
        let a = m(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let b = m(&[&[0.5, 0.5], &[0.25, 0.75]]);
        assert_abs_diff_eq!(a.difference(&b).unwrap(), 1.5);
        assert_abs_diff_eq!(a.difference(&a).unwrap(), 0.0);
    }

    #[test]
    fn sub_matrix_follows_class_order() {
        let tm = weather();
        let class = Class::new(ClassId(0), vec![3, 1]);
        let sub = tm.sub_matrix(&class).unwrap();
        assert_eq!(sub, m(&[&[0.5, 0.2], &[0.2, 0.5]]));
    }

    #[test]
    fn sub_matrix_of_full_class_is_identity_map() {
        let tm = weather();
        let class = Class::new(ClassId(0), vec![1, 2, 3]);
        assert_eq!(tm.sub_matrix(&class).unwrap(), tm);
    }

    #[test]
    fn sub_matrix_rejects_foreign_vertex() {
        let class = Class::new(ClassId(1), vec![1, 9]);
        let err = weather().sub_matrix(&class).unwrap_err();
        assert_eq!(
            err,
            ChainError::ClassOutOfRange {
                class: "C2".to_string(),
                n: 3
            }
        );
    }

    #[test]
    fn left_apply_and_row_spread() {
        let tm = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(tm.left_apply(&[0.25, 0.75]).unwrap(), vec![0.75, 0.25]);
        assert_abs_diff_eq!(tm.row_spread(), 2.0);
        assert_abs_diff_eq!(m(&[&[0.5, 0.5], &[0.5, 0.5]]).row_spread(), 0.0);
        assert!(tm.left_apply(&[1.0]).is_err());
    }

    #[test]
    fn mean_of_powers() {
        let flip = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let avg = TransitionMatrix::mean(&[flip.clone(), flip.power(2)]).unwrap();
        assert_eq!(avg, m(&[&[0.5, 0.5], &[0.5, 0.5]]));
        assert!(TransitionMatrix::mean(&[]).is_err());
    }

    #[test]
    fn sample_distribution() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let tm = weather();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let s = tm.sample(1, &mut rng).unwrap();
            counts[s - 1] += 1;
        }
        let f0 = counts[0] as f64 / n as f64;
        assert!((f0 - 0.5).abs() < 0.03, "frequency of 1: {f0}, expected ~0.5");
    }

    #[test]
    fn sample_empty_row() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let tm = TransitionMatrix::zeros(2);
        assert_eq!(tm.sample(1, &mut StdRng::seed_from_u64(0)), None);
    }
}
