use minic_types::Type;
use std::collections::HashMap;

/// Represents the kind of a symbol in the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A variable symbol (declarations and function parameters)
    Variable,
    /// A function symbol (user functions and the `print` built-in)
    Function,
}

/// The signature of a function symbol
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Parameter types in declaration order
    pub param_types: Vec<Type>,
    /// Declared return type
    pub return_type: Type,
}

impl FunctionSignature {
    pub fn new(param_types: Vec<Type>, return_type: Type) -> Self {
        Self {
            param_types,
            return_type,
        }
    }
}

/// Represents a symbol in the symbol table
///
/// A symbol contains all the information needed to identify and work with
/// a named entity: its name, kind, type, and (for functions) signature.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The name of the symbol as it appears in source code
    pub name: String,
    /// The kind of symbol (variable or function)
    pub kind: SymbolKind,
    /// The type associated with this symbol
    pub ty: Type,
    /// The signature, present only for function symbols
    pub signature: Option<FunctionSignature>,
}

impl Symbol {
    /// Creates a variable symbol with the given type
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable,
            ty,
            signature: None,
        }
    }

    /// Creates a function symbol with the given signature
    pub fn function(name: impl Into<String>, signature: FunctionSignature) -> Self {
        let ty = signature.return_type;
        Self {
            name: name.into(),
            kind: SymbolKind::Function,
            ty,
            signature: Some(signature),
        }
    }
}

/// A scoped symbol table for managing symbols during compilation
///
/// Scopes form a stack: the outermost scope holds function signatures,
/// each function and block pushes a child scope. Lookup walks from the
/// innermost scope outward; definitions conflict only with symbols in
/// the current scope, so shadowing in a child scope is legal.
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// Creates a symbol table containing only the global scope
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![HashMap::new()],
        }
    }

    /// Opens a child scope. Used when entering a function or block.
    pub fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the current scope, dropping its symbols.
    pub fn end_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot end the global scope");
        self.scopes.pop();
    }

    /// Defines a new symbol in the current scope
    ///
    /// ### Returns
    /// * `Ok(())` if the symbol was successfully defined
    /// * `Err(String)` with an error message if the name is already taken
    ///   in the current scope
    pub fn define(&mut self, symbol: Symbol) -> Result<(), String> {
        let scope = self
            .scopes
            .last_mut()
            .expect("symbol table always has a global scope");
        if let Some(existing) = scope.get(&symbol.name) {
            let what = match existing.kind {
                SymbolKind::Function => "Function",
                SymbolKind::Variable => "Symbol",
            };
            return Err(format!(
                "{} '{}' is already defined in the current scope.",
                what, symbol.name
            ));
        }
        scope.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Looks up a symbol by name, walking scopes from innermost outward
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Looks up a symbol in the current scope only
    pub fn lookup_current(&self, name: &str) -> Option<&Symbol> {
        self.scopes
            .last()
            .expect("symbol table always has a global scope")
            .get(name)
    }

    /// The number of open scopes, including the global one
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
