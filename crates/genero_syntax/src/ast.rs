//! Arena-based abstract syntax tree.
//!
//! The whole-module tree lives in one [`Ast`] arena: nodes are addressed by
//! [`NodeId`] handles, a node's `parent` is a navigation-only back link, and
//! the arena owns every node, so the tree is dropped as a unit when a module
//! is re-parsed. Node variants form a tagged union ([`NodeKind`]) rather
//! than a trait hierarchy; the parser works through free-standing `impl`
//! blocks on [`Parser`](crate::parser), not virtual dispatch.
//!
//! ## Invariants
//! - `node.span.end >= node.span.start`, and every child's span lies inside
//!   its parent's span once the parent is finished.
//! - `children` is ordered by span start; parses are monotonic, so appends
//!   preserve order and child start offsets are unique per parent.
//! - `complete` is `true` only when the full required grammar of the node
//!   was recognized.

use crate::lexer::Span;
use crate::symbols::SymbolMap;
use genero_core::lang::keywords::KeywordId;
use genero_core::lang::types::{BuiltinTypeId, TimeQualifier};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// ARENA
// ============================================================================

/// Handle to a node in an [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One syntactic construct.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub span: Span,
    pub parent: Option<NodeId>,
    /// Child handles ordered by span start.
    pub children: Vec<NodeId>,
    /// `true` iff the parse recognized the full required grammar.
    pub complete: bool,
    pub kind: NodeKind,
}

/// Arena owning one module's tree.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node with no parent and no children.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            span,
            parent: None,
            children: Vec::new(),
            complete: false,
            kind,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Append `child` under `parent`, keeping the child list ordered by span
    /// start and growing the parent's span to cover the child.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_ne!(parent, child);
        self.nodes[child.index()].parent = Some(parent);
        let child_span = self.nodes[child.index()].span;

        // Parses are monotonic, so the common case is a plain push.
        let out_of_order = match self.nodes[parent.index()].children.last() {
            Some(&last) => self.nodes[last.index()].span.start > child_span.start,
            None => false,
        };
        if out_of_order {
            let pos = {
                let children = &self.nodes[parent.index()].children;
                children
                    .iter()
                    .position(|&c| self.nodes[c.index()].span.start > child_span.start)
                    .unwrap_or(children.len())
            };
            self.nodes[parent.index()].children.insert(pos, child);
        } else {
            self.nodes[parent.index()].children.push(child);
        }

        let parent_node = &mut self.nodes[parent.index()];
        parent_node.span = parent_node.span.merge(child_span);
    }

    /// Extend a node's span end as trailing pieces are consumed.
    pub fn extend_span(&mut self, id: NodeId, end: usize) {
        let node = &mut self.nodes[id.index()];
        if end > node.span.end {
            node.span.end = end;
        }
    }

    pub fn set_complete(&mut self, id: NodeId, complete: bool) {
        self.nodes[id.index()].complete = complete;
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// The deepest node whose span contains `offset`, walking from the root.
    pub fn node_at_offset(&self, offset: usize) -> Option<NodeId> {
        let mut current = self.root?;
        if !self.node(current).span.contains(offset) {
            return None;
        }
        'descend: loop {
            for &child in self.children(current) {
                if self.node(child).span.contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Walk `parent` links from `id` until a node matching `pred` is found.
    pub fn ancestor_where(&self, id: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut current = self.node(id).parent;
        while let Some(node_id) = current {
            if pred(self.node(node_id)) {
                return Some(node_id);
            }
            current = self.node(node_id).parent;
        }
        None
    }
}

// ============================================================================
// TYPE REFERENCES
// ============================================================================

/// Constraint suffix on a scalar type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeConstraint {
    /// `( n [, m] )`: length or precision/scale.
    Arguments(Vec<u64>),
    /// `q1 TO q2[(scale)]`.
    DatetimeRange {
        from: TimeQualifier,
        to: TimeQualifier,
        scale: Option<u32>,
    },
    /// `q1[(n)] TO q2[(scale)]`.
    IntervalRange {
        from: TimeQualifier,
        from_precision: Option<u32>,
        to: TimeQualifier,
        scale: Option<u32>,
    },
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConstraint::Arguments(args) => {
                write!(f, "(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ")")
            }
            TypeConstraint::DatetimeRange { from, to, scale } => {
                write!(f, " {} to {}", from.as_str(), to.as_str())?;
                if let Some(s) = scale {
                    write!(f, "({})", s)?;
                }
                Ok(())
            }
            TypeConstraint::IntervalRange {
                from,
                from_precision,
                to,
                scale,
            } => {
                write!(f, " {}", from.as_str())?;
                if let Some(p) = from_precision {
                    write!(f, "({})", p)?;
                }
                write!(f, " to {}", to.as_str())?;
                if let Some(s) = scale {
                    write!(f, "({})", s)?;
                }
                Ok(())
            }
        }
    }
}

/// Which of the three exclusive shapes a [`NodeKind::TypeReference`] holds.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// Builtin or user-defined scalar name, optionally constrained.
    Scalar {
        /// Name as written (canonicalized to lowercase for builtins).
        name: String,
        builtin: Option<BuiltinTypeId>,
        constraint: Option<TypeConstraint>,
    },
    /// `LIKE [db:]table.column` mimicry.
    Like {
        database: Option<String>,
        table: String,
        column: String,
    },
    /// The type is the node's single child (array or record node).
    Nested,
}

/// Payload of a type reference node.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRefData {
    pub shape: TypeShape,
}

impl TypeRefData {
    /// Canonical display form, e.g. `decimal(10, 2)` or `like cust.name`.
    pub fn display(&self) -> String {
        match &self.shape {
            TypeShape::Scalar {
                name, constraint, ..
            } => match constraint {
                Some(c) => format!("{}{}", name, c),
                None => name.clone(),
            },
            TypeShape::Like {
                database,
                table,
                column,
            } => match database {
                Some(db) => format!("like {}:{}.{}", db, table, column),
                None => format!("like {}.{}", table, column),
            },
            TypeShape::Nested => String::new(),
        }
    }
}

/// Sentinel meaning "dimension unspecified / unbounded" on static arrays.
pub const DIMENSION_DEFAULT: u16 = u16::MAX;

/// Array flavor of an array-type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    /// `ARRAY [d1[,d2[,d3]]] OF T`; unspecified dims hold
    /// [`DIMENSION_DEFAULT`].
    Static { dims: [u16; 3] },
    /// `DYNAMIC ARRAY [WITH DIMENSION n] OF T`, n in 1..=3.
    Dynamic { dimension: u8 },
    /// `ARRAY [] OF T` (Java-style, unsized).
    Java,
}

impl ArrayKind {
    /// Uniform dimension view: Java-style and unspecified static dimensions
    /// report the sentinel.
    pub fn dimensions(self) -> [u16; 3] {
        match self {
            ArrayKind::Static { dims } => dims,
            ArrayKind::Java => [DIMENSION_DEFAULT; 3],
            ArrayKind::Dynamic { dimension } => {
                let mut dims = [DIMENSION_DEFAULT; 3];
                dims[0] = dimension as u16;
                dims
            }
        }
    }
}

// ============================================================================
// EXPRESSION PAYLOADS
// ============================================================================

/// Suffix piece of a name expression.
#[derive(Debug, Clone, PartialEq)]
pub enum NamePiece {
    /// `.member`
    Member(String),
    /// `[expr, ...]`: index expressions are children of the name node.
    Index { exprs: Vec<NodeId> },
}

/// `customer.orders[i].total`-style reference.
#[derive(Debug, Clone, PartialEq)]
pub struct NameExprData {
    pub base: String,
    pub pieces: Vec<NamePiece>,
}

impl NameExprData {
    /// Flattened display string; index expressions render as `[]`.
    pub fn display(&self) -> String {
        let mut out = self.base.clone();
        for piece in &self.pieces {
            match piece {
                NamePiece::Member(m) => {
                    out.push('.');
                    out.push_str(m);
                }
                NamePiece::Index { .. } => out.push_str("[]"),
            }
        }
        out
    }
}

/// One-or-more raw tokens concatenated (numeric/operator runs).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenExprData {
    pub text: String,
}

/// Adjacent string-literal tokens accumulated into one value.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExprData {
    pub value: String,
}

/// `name(arg, ...)` call; arguments are children of the call node.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallData {
    pub name: String,
    pub args: Vec<NodeId>,
}

// ============================================================================
// DECLARATION / BLOCK PAYLOADS
// ============================================================================

/// Access modifier on module-level declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Public,
    Private,
}

/// `DEFINE a, b TYPE`: one name list bound to one type reference child.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefData {
    pub names: Vec<(String, Span)>,
    pub type_ref: Option<NodeId>,
}

/// One `name [type] = literal` item of a `CONSTANT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantItemData {
    pub name: String,
    pub name_span: Span,
    pub type_name: Option<String>,
    pub value: Option<NodeId>,
}

/// One `name TYPE` item of a `TYPE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeItemData {
    pub name: String,
    pub name_span: Span,
    pub type_ref: Option<NodeId>,
}

/// Record definition: explicit fields or `RECORD LIKE table.*` mimicry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordData {
    /// `Some((db, table))` for mimicry records; members resolve externally.
    pub mimic: Option<(Option<String>, String)>,
    pub members: SymbolMap,
}

/// One field of an explicit record definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFieldData {
    pub name: String,
    pub name_span: Span,
    pub type_ref: Option<NodeId>,
}

/// Symbol tables shared by main/function/report blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockTables {
    pub variables: SymbolMap,
    pub types: SymbolMap,
    pub constants: SymbolMap,
}

/// `FUNCTION name(params)` / `MAIN` / `REPORT name(params)` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBlockData {
    pub name: String,
    pub name_span: Span,
    pub access: Access,
    pub params: Vec<(String, Span)>,
    pub tables: BlockTables,
}

/// `GLOBALS "file"` or `GLOBALS ... END GLOBALS` payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalsData {
    pub filename: Option<String>,
    pub tables: BlockTables,
}

/// Module-level symbol tables and include map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleData {
    pub variables: SymbolMap,
    pub types: SymbolMap,
    pub constants: SymbolMap,
    pub functions: SymbolMap,
    pub cursors: SymbolMap,
    /// `&include` targets → directive occurrences, resolved by the caller.
    pub includes: HashMap<String, Vec<Span>>,
}

// ============================================================================
// STATEMENT PAYLOADS
// ============================================================================

/// `FOR counter = from TO to [STEP n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForData {
    pub counter: String,
    pub from: Option<NodeId>,
    pub to: Option<NodeId>,
    pub step: Option<NodeId>,
}

/// `FOREACH cursor [USING vars] [INTO vars]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeachData {
    pub cursor: String,
    pub using: Vec<NodeId>,
    pub into: Vec<NodeId>,
}

/// `WHEN expr` / `OTHERWISE` branch of a `CASE`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenBranchData {
    pub condition: Option<NodeId>,
    pub is_otherwise: bool,
}

/// `EXIT kind` / `CONTINUE kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopJumpData {
    pub target: KeywordId,
}

/// `CALL f(args) [RETURNING v, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallData {
    pub callee: Option<NodeId>,
    pub returning: Vec<NodeId>,
}

/// `LET target = expr [, expr ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LetData {
    pub target: Option<NodeId>,
    pub values: Vec<NodeId>,
}

/// `MENU "title" ... END MENU` option kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuOptionKind {
    Command { name: String },
    Action { name: String },
    Before,
    Key { name: String },
}

/// One option block inside a `MENU`.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOptionData {
    pub kind: MenuOptionKind,
}

/// Dialog sub-block kinds (structural only).
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEventKind {
    BeforeDialog,
    AfterDialog,
    OnAction { name: String },
}

/// One event block inside a `DIALOG`.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogEventData {
    pub kind: DialogEventKind,
}

/// `DISPLAY expr-list [TO fields | AT r,c]` or `DISPLAY BY NAME list`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayData {
    pub by_name: bool,
}

/// `INPUT [BY NAME] targets [WITHOUT DEFAULTS] [FROM fields]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InputData {
    pub by_name: bool,
    pub without_defaults: bool,
}

/// `PROMPT expr FOR [CHAR] variable`.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptData {
    pub message: Option<NodeId>,
    pub target: Option<NodeId>,
}

/// `CONSTRUCT [BY NAME] var ON columns [FROM fields]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructData {
    pub by_name: bool,
    pub target: Option<NodeId>,
    pub columns: Vec<String>,
}

/// `WHENEVER condition action`.
#[derive(Debug, Clone, PartialEq)]
pub struct WheneverData {
    pub condition: String,
    pub action: String,
}

/// `INITIALIZE targets TO NULL | LIKE table.*`.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializeData {
    pub targets: Vec<NodeId>,
    pub to_null: bool,
}

/// `LOAD FROM file [DELIMITER d] INSERT INTO table` / `UNLOAD TO file ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadData {
    pub file: Option<NodeId>,
    pub table: Option<String>,
    pub delimiter: Option<String>,
    pub is_unload: bool,
}

/// `CREATE [TEMP] TABLE name (...)`: structural capture only.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableData {
    pub table: String,
    pub temp: bool,
}

/// `DECLARE name [SCROLL] CURSOR [WITH HOLD] FOR select | prepared`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareCursorData {
    pub name: String,
    pub name_span: Span,
    pub scroll: bool,
    pub hold: bool,
    /// Statement id when declared `FOR prepared_stmt`.
    pub prepared: Option<String>,
    pub select: Option<NodeId>,
}

/// `PREPARE name FROM expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareData {
    pub name: String,
    pub name_span: Span,
    pub source: Option<NodeId>,
}

/// `EXECUTE name [USING vars] [INTO vars]` / `EXECUTE IMMEDIATE expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteData {
    pub name: Option<String>,
    pub immediate: Option<NodeId>,
    pub using: Vec<NodeId>,
    pub into: Vec<NodeId>,
}

/// `OPEN cursor [USING vars]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenData {
    pub cursor: String,
    pub using: Vec<NodeId>,
}

/// Fetch direction for scroll cursors.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchDirection {
    Next,
    Previous,
    First,
    Last,
    Current,
    Prior,
    Absolute(NodeId),
    Relative(NodeId),
}

/// `FETCH [direction] cursor [INTO vars]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchData {
    pub direction: Option<FetchDirection>,
    pub cursor: String,
    pub into: Vec<NodeId>,
}

/// `SELECT list INTO vars FROM tables [WHERE ...]`: structural capture.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectData {
    pub distinct: bool,
    pub columns: Vec<NodeId>,
    pub into: Vec<NodeId>,
    pub tables: Vec<String>,
    pub where_clause: Option<NodeId>,
}

/// A recognized-but-unsupported SQL statement (`UPDATE`, `INSERT`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedSqlData {
    pub keyword: KeywordId,
}

/// `&include "file"` and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessorData {
    pub directive: String,
    pub argument: Option<String>,
}

/// `IMPORT FGL module` / `IMPORT module`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportData {
    pub module: String,
}

/// `SCHEMA name` / `DATABASE name`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaData {
    pub database: String,
}

/// Module-head compiler option line (`OPTIONS ...` before any block).
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOptionData {
    pub options: Vec<String>,
}

// ============================================================================
// NODE KIND
// ============================================================================

/// Tagged union over every syntactic construct.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Module level
    Module(ModuleData),
    CompilerOption(CompilerOptionData),
    Import(ImportData),
    SchemaSpec(SchemaData),
    Globals(GlobalsData),
    MainBlock(FunctionBlockData),
    FunctionBlock(FunctionBlockData),
    ReportBlock(FunctionBlockData),
    Preprocessor(PreprocessorData),

    // Declarations
    Define { access: Access },
    VariableDef(VariableDefData),
    ConstantDef { access: Access },
    ConstantItem(ConstantItemData),
    TypeDef { access: Access },
    TypeItem(TypeItemData),
    TypeReference(TypeRefData),
    ArrayType { kind: ArrayKind },
    Record(RecordData),
    RecordField(RecordFieldData),

    // Statements
    If { condition: Option<NodeId> },
    ElseBlock,
    While { condition: Option<NodeId> },
    For(ForData),
    Foreach(ForeachData),
    Case { subject: Option<NodeId> },
    WhenBranch(WhenBranchData),
    TryBlock,
    CatchBlock,
    Menu { title: Option<NodeId> },
    MenuOption(MenuOptionData),
    Dialog,
    DialogEvent(DialogEventData),
    Construct(ConstructData),
    Display(DisplayData),
    Input(InputData),
    Prompt(PromptData),
    Call(CallData),
    Let(LetData),
    Return { values: Vec<NodeId> },
    Exit(LoopJumpData),
    Continue(LoopJumpData),
    Message { values: Vec<NodeId> },
    ErrorStmt { values: Vec<NodeId> },
    Sleep { seconds: Option<NodeId> },
    Goto { label: String },
    Label { name: String },
    Defer { what: KeywordId },
    Whenever(WheneverData),
    Initialize(InitializeData),
    Options { options: Vec<String> },
    Load(LoadData),
    CreateTable(CreateTableData),
    DeclareCursor(DeclareCursorData),
    Prepare(PrepareData),
    Execute(ExecuteData),
    Open(OpenData),
    Fetch(FetchData),
    Close { cursor: String },
    Free { name: String },
    Select(SelectData),
    UnsupportedSql(UnsupportedSqlData),

    // Expressions
    NameExpr(NameExprData),
    TokenExpr(TokenExprData),
    StringExpr(StringExprData),
    ParenExpr,
    FunctionCall(FunctionCallData),
}

impl NodeKind {
    /// Short label used by the outline renderer and debug output.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Module(_) => "module",
            NodeKind::CompilerOption(_) => "compiler-option",
            NodeKind::Import(_) => "import",
            NodeKind::SchemaSpec(_) => "schema",
            NodeKind::Globals(_) => "globals",
            NodeKind::MainBlock(_) => "main",
            NodeKind::FunctionBlock(_) => "function",
            NodeKind::ReportBlock(_) => "report",
            NodeKind::Preprocessor(_) => "preprocessor",
            NodeKind::Define { .. } => "define",
            NodeKind::VariableDef(_) => "variable-def",
            NodeKind::ConstantDef { .. } => "constant",
            NodeKind::ConstantItem(_) => "constant-item",
            NodeKind::TypeDef { .. } => "type",
            NodeKind::TypeItem(_) => "type-item",
            NodeKind::TypeReference(_) => "type-ref",
            NodeKind::ArrayType { .. } => "array-type",
            NodeKind::Record(_) => "record",
            NodeKind::RecordField(_) => "record-field",
            NodeKind::If { .. } => "if",
            NodeKind::ElseBlock => "else",
            NodeKind::While { .. } => "while",
            NodeKind::For(_) => "for",
            NodeKind::Foreach(_) => "foreach",
            NodeKind::Case { .. } => "case",
            NodeKind::WhenBranch(_) => "when",
            NodeKind::TryBlock => "try",
            NodeKind::CatchBlock => "catch",
            NodeKind::Menu { .. } => "menu",
            NodeKind::MenuOption(_) => "menu-option",
            NodeKind::Dialog => "dialog",
            NodeKind::DialogEvent(_) => "dialog-event",
            NodeKind::Construct(_) => "construct",
            NodeKind::Display(_) => "display",
            NodeKind::Input(_) => "input",
            NodeKind::Prompt(_) => "prompt",
            NodeKind::Call(_) => "call",
            NodeKind::Let(_) => "let",
            NodeKind::Return { .. } => "return",
            NodeKind::Exit(_) => "exit",
            NodeKind::Continue(_) => "continue",
            NodeKind::Message { .. } => "message",
            NodeKind::ErrorStmt { .. } => "error",
            NodeKind::Sleep { .. } => "sleep",
            NodeKind::Goto { .. } => "goto",
            NodeKind::Label { .. } => "label",
            NodeKind::Defer { .. } => "defer",
            NodeKind::Whenever(_) => "whenever",
            NodeKind::Initialize(_) => "initialize",
            NodeKind::Options { .. } => "options",
            NodeKind::Load(_) => "load",
            NodeKind::CreateTable(_) => "create-table",
            NodeKind::DeclareCursor(_) => "declare",
            NodeKind::Prepare(_) => "prepare",
            NodeKind::Execute(_) => "execute",
            NodeKind::Open(_) => "open",
            NodeKind::Fetch(_) => "fetch",
            NodeKind::Close { .. } => "close",
            NodeKind::Free { .. } => "free",
            NodeKind::Select(_) => "select",
            NodeKind::UnsupportedSql(_) => "unsupported-sql",
            NodeKind::NameExpr(_) => "name-expr",
            NodeKind::TokenExpr(_) => "token-expr",
            NodeKind::StringExpr(_) => "string-expr",
            NodeKind::ParenExpr => "paren-expr",
            NodeKind::FunctionCall(_) => "call-expr",
        }
    }

    /// `true` for expression variants.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::NameExpr(_)
                | NodeKind::TokenExpr(_)
                | NodeKind::StringExpr(_)
                | NodeKind::ParenExpr
                | NodeKind::FunctionCall(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_orders_children_and_grows_parent_span() {
        let mut ast = Ast::new();
        let parent = ast.alloc(NodeKind::Dialog, Span::new(0, 0));
        let b = ast.alloc(NodeKind::ParenExpr, Span::new(10, 14));
        let a = ast.alloc(NodeKind::ParenExpr, Span::new(2, 6));
        ast.attach(parent, b);
        ast.attach(parent, a);
        let starts: Vec<_> = ast
            .children(parent)
            .iter()
            .map(|&c| ast.node(c).span.start)
            .collect();
        assert_eq!(starts, vec![2, 10]);
        assert_eq!(ast.node(parent).span, Span::new(0, 14));
        assert_eq!(ast.node(a).parent, Some(parent));
    }

    #[test]
    fn node_at_offset_finds_deepest() {
        let mut ast = Ast::new();
        let root = ast.alloc(NodeKind::Dialog, Span::new(0, 20));
        let inner = ast.alloc(NodeKind::ParenExpr, Span::new(5, 10));
        ast.attach(root, inner);
        ast.set_root(root);
        assert_eq!(ast.node_at_offset(7), Some(inner));
        assert_eq!(ast.node_at_offset(15), Some(root));
        assert_eq!(ast.node_at_offset(25), None);
    }

    #[test]
    fn array_dimensions_report_sentinel() {
        assert_eq!(ArrayKind::Java.dimensions(), [DIMENSION_DEFAULT; 3]);
        let stat = ArrayKind::Static {
            dims: [5, DIMENSION_DEFAULT, DIMENSION_DEFAULT],
        };
        assert_eq!(stat.dimensions()[0], 5);
    }

    #[test]
    fn type_constraint_display_uses_canonical_spacing() {
        let c = TypeConstraint::Arguments(vec![10, 2]);
        assert_eq!(c.to_string(), "(10, 2)");
        let d = TypeConstraint::DatetimeRange {
            from: TimeQualifier::Year,
            to: TimeQualifier::Second,
            scale: None,
        };
        assert_eq!(d.to_string(), " year to second");
    }
}
