use crate::error::EngineError;
use minic_error::ErrorCode;
use minic_frontend::Token;
use minic_ir::ast::Program;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Rough per-node cost used when accounting AST memory
const AST_NODE_SIZE: usize = 64;

/// A value held by the [`Context`].
///
/// The context is generic over this closed sum of payloads: the artifacts
/// exchanged by the compiler stages plus small scalar payloads used by
/// middleware. Entries are stored behind `Arc`, so the release of a value
/// is its `Drop`, which runs exactly once when the last reference
/// (binding or outstanding [`Context::acquire`] handle) goes away.
#[derive(Debug, Clone)]
pub enum Value {
    /// Source text consumed by the lexer
    Source(String),
    /// Token stream produced by the lexer
    Tokens(Vec<Token>),
    /// Abstract syntax tree produced by the parser
    Ast(Program),
    /// Generated output code
    Output(String),
    /// A boolean flag (advisory signals)
    Flag(bool),
    /// A numeric payload (timings, counters)
    Number(i64),
    /// An arbitrary text payload
    Text(String),
}

impl Value {
    /// Estimated footprint of the value, used for the memory budget
    pub fn approximate_size(&self) -> usize {
        match self {
            Value::Source(s) | Value::Output(s) | Value::Text(s) => s.len(),
            Value::Tokens(tokens) => tokens
                .iter()
                .map(|t| std::mem::size_of::<Token>() + t.lexeme.len())
                .sum(),
            Value::Ast(program) => program.node_count() * AST_NODE_SIZE,
            Value::Flag(_) | Value::Number(_) => std::mem::size_of::<i64>(),
        }
    }

    pub fn as_source(&self) -> Option<&str> {
        match self {
            Value::Source(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[Token]> {
        match self {
            Value::Tokens(tokens) => Some(tokens),
            _ => None,
        }
    }

    pub fn as_ast(&self) -> Option<&Program> {
        match self {
            Value::Ast(program) => Some(program),
            _ => None,
        }
    }

    pub fn as_ast_mut(&mut self) -> Option<&mut Program> {
        match self {
            Value::Ast(program) => Some(program),
            _ => None,
        }
    }

    pub fn as_output(&self) -> Option<&str> {
        match self {
            Value::Output(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Hard budgets enforced by the context
#[derive(Debug, Clone, Copy)]
pub struct ContextLimits {
    /// Maximum key length in bytes
    pub max_key_length: usize,
    /// Maximum number of entries
    pub max_entries: usize,
    /// Maximum tracked memory in bytes
    pub max_memory: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_key_length: 64,
            max_entries: 256,
            max_memory: 16 * 1024 * 1024,
        }
    }
}

struct ContextInner {
    entries: HashMap<String, Arc<Value>>,
    memory: usize,
    limits: ContextLimits,
}

/// Shared typed key/value store passed through the pipeline.
///
/// All observable state sits behind a single lock, so the context may be
/// used from multiple threads. Cloning is cheap and yields a handle to the
/// same store.
#[derive(Clone)]
pub struct Context {
    inner: Arc<Mutex<ContextInner>>,
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl Context {
    /// Creates a context with the default limits
    pub fn new() -> Self {
        Context::with_limits(ContextLimits::default())
    }

    /// Creates a context enforcing the given limits
    pub fn with_limits(limits: ContextLimits) -> Self {
        Context {
            inner: Arc::new(Mutex::new(ContextInner {
                entries: HashMap::new(),
                memory: 0,
                limits,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ContextInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Binds or rebinds a key. Rebinding releases the prior value.
    ///
    /// Fails with `KeyTooLong`, `CapacityExceeded`, `MemoryLimitExceeded`
    /// or `Overflow`; a failed mutation leaves the context unchanged.
    pub fn set(&self, key: &str, value: Value) -> Result<(), EngineError> {
        let mut inner = self.lock();

        if key.len() > inner.limits.max_key_length {
            return Err(EngineError::new(
                ErrorCode::KeyTooLong,
                format!(
                    "context key of {} bytes exceeds the limit of {}",
                    key.len(),
                    inner.limits.max_key_length
                ),
            ));
        }

        let replaced_size = inner
            .entries
            .get(key)
            .map(|existing| existing.approximate_size());

        if replaced_size.is_none() && inner.entries.len() >= inner.limits.max_entries {
            return Err(EngineError::new(
                ErrorCode::CapacityExceeded,
                format!(
                    "context already holds the maximum of {} entries",
                    inner.limits.max_entries
                ),
            ));
        }

        let size = value.approximate_size();
        let next_memory = inner
            .memory
            .checked_sub(replaced_size.unwrap_or(0))
            .and_then(|memory| memory.checked_add(size))
            .ok_or_else(|| {
                EngineError::new(ErrorCode::Overflow, "context size accounting overflowed")
            })?;

        if next_memory > inner.limits.max_memory {
            return Err(EngineError::new(
                ErrorCode::MemoryLimitExceeded,
                format!(
                    "entry of {} bytes would exceed the {} byte budget",
                    size, inner.limits.max_memory
                ),
            ));
        }

        inner.entries.insert(key.to_string(), Arc::new(value));
        inner.memory = next_memory;
        Ok(())
    }

    /// Returns a borrowed view of the value bound to `key`.
    ///
    /// The view must be treated as read-only and should not outlive the
    /// surrounding stage; use [`Context::acquire`] for a longer-lived
    /// reference.
    pub fn get(&self, key: &str) -> Result<Arc<Value>, EngineError> {
        let inner = self.lock();
        inner.entries.get(key).cloned().ok_or_else(|| {
            EngineError::new(
                ErrorCode::NotFound,
                format!("no context entry for key '{key}'"),
            )
        })
    }

    /// Returns an owned reference that keeps the value alive until dropped,
    /// regardless of whether the context rebinds or removes the key.
    pub fn acquire(&self, key: &str) -> Result<Arc<Value>, EngineError> {
        self.get(key)
    }

    /// Applies a closure to the value bound to `key` in place.
    ///
    /// The mutation happens through `Arc::make_mut`: if an acquired handle
    /// is still outstanding, the value is cloned first so that the handle
    /// keeps observing the old state. Tracked memory is re-accounted after
    /// the closure returns; the memory budget is enforced only by `set`.
    pub fn update<T>(
        &self,
        key: &str,
        mutate: impl FnOnce(&mut Value) -> T,
    ) -> Result<T, EngineError> {
        let mut inner = self.lock();

        let entry = inner.entries.get_mut(key).ok_or_else(|| {
            EngineError::new(
                ErrorCode::NotFound,
                format!("no context entry for key '{key}'"),
            )
        })?;

        let old_size = entry.approximate_size();
        let result = mutate(Arc::make_mut(entry));
        let new_size = entry.approximate_size();

        inner.memory = inner
            .memory
            .checked_sub(old_size)
            .and_then(|memory| memory.checked_add(new_size))
            .ok_or_else(|| {
                EngineError::new(ErrorCode::Overflow, "context size accounting overflowed")
            })?;

        Ok(result)
    }

    /// Drops the binding for `key`, releasing the context's reference
    pub fn remove(&self, key: &str) -> Result<(), EngineError> {
        let mut inner = self.lock();
        let removed = inner.entries.remove(key).ok_or_else(|| {
            EngineError::new(
                ErrorCode::NotFound,
                format!("no context entry for key '{key}'"),
            )
        })?;
        inner.memory = inner.memory.saturating_sub(removed.approximate_size());
        Ok(())
    }

    /// True if a binding exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// True if `key` is bound to a raised flag
    pub fn is_flag_set(&self, key: &str) -> bool {
        self.lock()
            .entries
            .get(key)
            .and_then(|value| value.as_flag())
            .unwrap_or(false)
    }

    /// Number of live bindings
    pub fn count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Currently tracked memory in bytes
    pub fn memory_usage(&self) -> usize {
        self.lock().memory
    }

    /// Drops every binding and resets the memory counter
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.memory = 0;
    }
}
