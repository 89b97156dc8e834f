//! Circular reference detection.
//!
//! Each top-level cell evaluation starts a fresh [`Chain`] holding just that
//! cell. Every reference hop borrows the current chain and links one more
//! address onto it, so sibling operands never see each other's visits and
//! nothing is shared between cells. A reference to any address already on the
//! chain is a cycle.

use super::{CellAddr, EvalError};

/// The addresses currently being resolved, innermost last.
#[derive(Debug)]
pub struct Chain<'a> {
    addr: CellAddr,
    parent: Option<&'a Chain<'a>>,
}

impl<'a> Chain<'a> {
    /// Start a chain at the cell under top-level evaluation.
    pub fn root(addr: CellAddr) -> Chain<'static> {
        Chain { addr, parent: None }
    }

    /// A new chain with `addr` visited after everything in `self`.
    pub fn extend(&'a self, addr: CellAddr) -> Chain<'a> {
        Chain {
            addr,
            parent: Some(self),
        }
    }

    pub fn contains(&self, addr: &CellAddr) -> bool {
        self.iter().any(|visited| visited == addr)
    }

    /// Number of addresses on the chain.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }

    /// Visiting order, outermost first.
    pub fn path(&self) -> Vec<CellAddr> {
        let mut path: Vec<CellAddr> = self.iter().cloned().collect();
        path.reverse();
        path
    }

    /// Fail with [`EvalError::CircularReference`] if `addr` is already on the chain.
    pub fn check(&self, addr: &CellAddr) -> Result<(), EvalError> {
        if self.contains(addr) {
            let mut path = self.path();
            path.push(addr.clone());
            return Err(EvalError::CircularReference(path));
        }
        Ok(())
    }

    // innermost first
    fn iter(&self) -> impl Iterator<Item = &CellAddr> + '_ {
        std::iter::successors(Some(self), |chain| chain.parent).map(|chain| &chain.addr)
    }
}
