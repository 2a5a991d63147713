//! Candidate regions between gaps

use super::{CandidateRegion, GapInterval};

/// Derives candidate question regions as the complement of gap intervals.
pub struct BoundaryResolver {
    min_gap_height: u32,
}

impl BoundaryResolver {
    pub fn new(min_gap_height: u32) -> Self {
        Self { min_gap_height }
    }

    /// Spans before the first gap, between consecutive gaps, and after the
    /// last gap, each kept only when strictly taller than `min_gap_height`.
    /// With no gaps at all, the whole composite is one region.
    pub fn resolve(&self, total_height: u32, gaps: &[GapInterval]) -> Vec<CandidateRegion> {
        if gaps.is_empty() {
            if total_height == 0 {
                return Vec::new();
            }
            return vec![CandidateRegion {
                y: 0,
                height: total_height,
            }];
        }

        let mut regions = Vec::with_capacity(gaps.len() + 1);
        let mut cursor = 0u32;
        for gap in gaps {
            self.push_span(&mut regions, cursor, gap.start_y);
            cursor = gap.end_y;
        }
        self.push_span(&mut regions, cursor, total_height);
        regions
    }

    fn push_span(&self, regions: &mut Vec<CandidateRegion>, start: u32, end: u32) {
        if end > start && end - start > self.min_gap_height {
            regions.push(CandidateRegion {
                y: start,
                height: end - start,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(start_y: u32, end_y: u32) -> GapInterval {
        GapInterval { start_y, end_y }
    }

    #[test]
    fn test_no_gaps_yields_whole_composite() {
        let resolver = BoundaryResolver::new(30);

        let regions = resolver.resolve(500, &[]);
        assert_eq!(regions, vec![CandidateRegion { y: 0, height: 500 }]);
    }

    #[test]
    fn test_single_gap_yields_leading_and_trailing_regions() {
        let resolver = BoundaryResolver::new(30);

        let regions = resolver.resolve(200, &[gap(80, 120)]);
        assert_eq!(
            regions,
            vec![
                CandidateRegion { y: 0, height: 80 },
                CandidateRegion { y: 120, height: 80 },
            ]
        );
    }

    #[test]
    fn test_gap_at_top_edge_leaves_no_leading_region() {
        let resolver = BoundaryResolver::new(30);

        let regions = resolver.resolve(200, &[gap(0, 50)]);
        assert_eq!(regions, vec![CandidateRegion { y: 50, height: 150 }]);
    }

    #[test]
    fn test_gap_at_bottom_edge_leaves_no_trailing_region() {
        let resolver = BoundaryResolver::new(30);

        let regions = resolver.resolve(200, &[gap(150, 200)]);
        assert_eq!(regions, vec![CandidateRegion { y: 0, height: 150 }]);
    }

    #[test]
    fn test_span_must_exceed_min_gap_height() {
        let resolver = BoundaryResolver::new(30);

        // leading span of exactly 30 is dropped, 31 is kept
        assert!(resolver.resolve(100, &[gap(30, 100)]).is_empty());
        assert_eq!(
            resolver.resolve(100, &[gap(31, 100)]),
            vec![CandidateRegion { y: 0, height: 31 }]
        );
    }

    #[test]
    fn test_multiple_gaps_produce_between_spans() {
        let resolver = BoundaryResolver::new(30);

        let regions = resolver.resolve(400, &[gap(100, 140), gap(240, 280)]);
        assert_eq!(
            regions,
            vec![
                CandidateRegion { y: 0, height: 100 },
                CandidateRegion { y: 140, height: 100 },
                CandidateRegion { y: 280, height: 120 },
            ]
        );
    }
}
