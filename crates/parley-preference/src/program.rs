//! Linear program over per-(issue, value) utility contributions

use std::collections::BTreeMap;

use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use parley_common::{Bid, BidRanking, Domain, DomainError, ParleyError, Result};
use tracing::debug;

/// Solved contributions, one row per issue aligned with the issue's value order
#[derive(Debug, Clone)]
pub struct ProgramSolution {
    /// x(i, v) per issue
    pub contributions: Vec<Vec<f64>>,
    /// Slack per adjacent ranking pair
    pub slacks: Vec<f64>,
    /// Sum of slacks at the optimum
    pub objective: f64,
}

impl ProgramSolution {
    /// Most negative contribution, or 0 when all are non-negative
    pub fn most_negative(&self) -> f64 {
        self.contributions
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::min)
    }
}

/// Variable layout of the contribution program
pub struct ContributionProgram<'a> {
    domain: &'a Domain,
    /// Index of the first contribution variable of each issue
    offsets: Vec<usize>,
    contribution_count: usize,
}

impl<'a> ContributionProgram<'a> {
    pub fn new(domain: &'a Domain) -> Result<Self> {
        domain.require_discrete()?;
        let mut offsets = Vec::with_capacity(domain.issue_count());
        let mut contribution_count = 0;
        for issue in &domain.issues {
            offsets.push(contribution_count);
            contribution_count += issue.values()?.len();
        }
        Ok(Self {
            domain,
            offsets,
            contribution_count,
        })
    }

    /// Number of x(i, v) variables
    pub fn contribution_count(&self) -> usize {
        self.contribution_count
    }

    /// Flat variable index of the value `bid` assigns to issue `issue`
    fn variable_index(&self, issue: usize, bid: &Bid) -> Result<usize> {
        let definition = &self.domain.issues[issue];
        let value = bid.value(issue).ok_or_else(|| {
            DomainError::InvalidBid(format!(
                "bid {} has no value for issue '{}'",
                bid, definition.name
            ))
        })?;
        let position = definition
            .position(value)
            .ok_or_else(|| DomainError::UnknownValue {
                issue: definition.name.clone(),
                value: value.to_string(),
            })?;
        Ok(self.offsets[issue] + position)
    }

    /// Accumulate `sign` × (every contribution of `bid`) into `terms`
    fn accumulate(&self, terms: &mut BTreeMap<usize, f64>, bid: &Bid, sign: f64) -> Result<()> {
        for issue in 0..self.domain.issue_count() {
            *terms.entry(self.variable_index(issue, bid)?).or_insert(0.0) += sign;
        }
        Ok(())
    }

    fn expression(variables: &[Variable], terms: &BTreeMap<usize, f64>) -> LinearExpr {
        let mut expr = LinearExpr::empty();
        for (&index, &coeff) in terms {
            if coeff != 0.0 {
                expr.add(variables[index], coeff);
            }
        }
        expr
    }

    /// Build and solve the program for `ranking`
    pub fn solve(&self, ranking: &BidRanking) -> Result<ProgramSolution> {
        let mut problem = Problem::new(OptimizationDirection::Minimize);

        let contributions: Vec<Variable> = (0..self.contribution_count)
            .map(|_| problem.add_var(0.0, (0.0, f64::INFINITY)))
            .collect();

        let mut slacks = Vec::with_capacity(ranking.comparison_count());
        for (lower, higher) in ranking.adjacent_pairs() {
            let slack = problem.add_var(1.0, (0.0, f64::INFINITY));
            slacks.push(slack);

            let mut terms = BTreeMap::new();
            self.accumulate(&mut terms, higher, 1.0)?;
            self.accumulate(&mut terms, lower, -1.0)?;

            let mut expr = Self::expression(&contributions, &terms);
            expr.add(slack, 1.0);
            problem.add_constraint(expr, ComparisonOp::Ge, 0.0);
        }

        // Normalization anchor: the best bid is worth exactly 1
        let mut anchor = BTreeMap::new();
        self.accumulate(&mut anchor, ranking.maximal_bid(), 1.0)?;
        problem.add_constraint(
            Self::expression(&contributions, &anchor),
            ComparisonOp::Eq,
            1.0,
        );

        debug!(
            contributions = self.contribution_count,
            comparisons = slacks.len(),
            "Solving contribution program"
        );

        let solution = problem
            .solve()
            .map_err(|e| ParleyError::EstimationFailure(e.to_string()))?;

        let values: Vec<f64> = contributions.iter().map(|var| solution[*var]).collect();
        let rows = self
            .offsets
            .iter()
            .zip(&self.domain.issues)
            .map(|(&offset, issue)| {
                let count = issue.values().map(|v| v.len()).unwrap_or(0);
                values[offset..offset + count].to_vec()
            })
            .collect();

        Ok(ProgramSolution {
            contributions: rows,
            slacks: slacks.iter().map(|var| solution[*var]).collect(),
            objective: solution.objective(),
        })
    }
}
