// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// Node definitions for the syntactic tree of an OpenQASM 3 program.
// The variants have the form XXX(XXX): the outer name is the variant, the
// inner name the struct holding the node's fields. Importing both symbols
// clobbers one with the other, so call sites usually qualify with ast::.

use crate::span::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    version: Option<Version>,
    statements: Vec<Statement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Version {
    major: usize,
    minor: usize,
}

impl Version {
    pub fn new(major: usize, minor: usize) -> Version {
        Version { major, minor }
    }

    pub fn major(&self) -> usize {
        self.major
    }

    pub fn minor(&self) -> usize {
        self.minor
    }
}

impl Program {
    pub fn new() -> Program {
        Program {
            version: None,
            statements: Vec::<Statement>::new(),
        }
    }

    pub fn with_statements(statements: Vec<Statement>) -> Program {
        Program {
            version: None,
            statements,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn insert_stmt(&mut self, stmt: Statement) {
        self.statements.push(stmt);
    }

    pub fn set_version(&mut self, version: Version) {
        if self.version.is_some() {
            panic!("OpenQASM version cannot be set more than once");
        }
        self.version = Some(version);
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

// Forward Vec methods (len, iter, ...) to the statement list.
impl std::ops::Deref for Program {
    type Target = Vec<Statement>;

    fn deref(&self) -> &Self::Target {
        &self.statements
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Alias(Box<AliasStatement>),
    Barrier(QuantumBarrier),
    Box(Box<BoxStatement>),
    Branch(Box<BranchingStatement>),
    Break,
    CalibrationDefinition(Box<CalibrationDefinition>),
    CalibrationGrammar(CalibrationGrammarDeclaration),
    ClassicalAssignment(Box<ClassicalAssignment>),
    ClassicalDeclaration(Box<ClassicalDeclaration>),
    ConstantDeclaration(Box<ConstantDeclaration>),
    Continue,
    Delay(Box<DelayInstruction>),
    End,
    ExprStmt(Expression),
    Extern(ExternDeclaration),
    ForIn(Box<ForInLoop>),
    GateDefinition(Box<QuantumGateDefinition>),
    GateCall(Box<QuantumGate>),
    IODeclaration(Box<IODeclaration>),
    Include(Include),
    MeasurementAssignment(Box<QuantumMeasurementAssignment>),
    Phase(Box<QuantumPhase>),
    Pragma(Pragma),
    QubitDeclaration(QubitDeclaration),
    Reset(QuantumReset),
    Return(Box<ReturnStatement>),
    SubroutineDefinition(Box<SubroutineDefinition>),
    While(Box<WhileLoop>),
}

impl Statement {
    /// Name of the statement kind, as used in `UnsupportedFeature` messages.
    pub fn kind_name(&self) -> &'static str {
        use Statement::*;
        match self {
            Alias(..) => "AliasStatement",
            Barrier(..) => "QuantumBarrier",
            Box(..) => "Box",
            Branch(..) => "BranchingStatement",
            Break => "BreakStatement",
            CalibrationDefinition(..) => "CalibrationDefinition",
            CalibrationGrammar(..) => "CalibrationGrammarDeclaration",
            ClassicalAssignment(..) => "ClassicalAssignment",
            ClassicalDeclaration(..) => "ClassicalDeclaration",
            ConstantDeclaration(..) => "ConstantDeclaration",
            Continue => "ContinueStatement",
            Delay(..) => "DelayInstruction",
            End => "EndStatement",
            ExprStmt(..) => "ExpressionStatement",
            Extern(..) => "ExternDeclaration",
            ForIn(..) => "ForInLoop",
            GateDefinition(..) => "QuantumGateDefinition",
            GateCall(..) => "QuantumGate",
            IODeclaration(..) => "IODeclaration",
            Include(..) => "Include",
            MeasurementAssignment(..) => "QuantumMeasurementAssignment",
            Phase(..) => "QuantumPhase",
            Pragma(..) => "Pragma",
            QubitDeclaration(..) => "QubitDeclaration",
            Reset(..) => "QuantumReset",
            Return(..) => "ReturnStatement",
            SubroutineDefinition(..) => "SubroutineDefinition",
            While(..) => "WhileLoop",
        }
    }

    pub fn span(&self) -> Option<&Span> {
        use Statement::*;
        match self {
            Alias(stmt) => stmt.span(),
            Barrier(stmt) => stmt.span(),
            Box(stmt) => stmt.span(),
            Branch(stmt) => stmt.span(),
            CalibrationDefinition(stmt) => stmt.span(),
            CalibrationGrammar(stmt) => stmt.span(),
            ClassicalAssignment(stmt) => stmt.span(),
            ClassicalDeclaration(stmt) => stmt.span(),
            ConstantDeclaration(stmt) => stmt.span(),
            Delay(stmt) => stmt.span(),
            ExprStmt(expr) => expr.span(),
            Extern(stmt) => stmt.span(),
            ForIn(stmt) => stmt.span(),
            GateDefinition(stmt) => stmt.span(),
            GateCall(stmt) => stmt.span(),
            IODeclaration(stmt) => stmt.span(),
            Include(stmt) => stmt.span(),
            MeasurementAssignment(stmt) => stmt.span(),
            Phase(stmt) => stmt.span(),
            Pragma(stmt) => stmt.span(),
            QubitDeclaration(stmt) => stmt.span(),
            Reset(stmt) => stmt.span(),
            Return(stmt) => stmt.span(),
            SubroutineDefinition(stmt) => stmt.span(),
            While(stmt) => stmt.span(),
            Break | Continue | End => None,
        }
    }
}

/// An identifier occurrence with its location.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    name: String,
    span: Option<Span>,
}

impl Identifier {
    pub fn new<T: ToString>(name: T) -> Identifier {
        Identifier {
            name: name.to_string(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Identifier {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::Identifier(self)
    }
}

//
// Expressions
//

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Binary(Box<BinaryExpression>),
    Unary(Box<UnaryExpression>),
    Constant(Constant),
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    RealLiteral(RealLiteral),
    BooleanLiteral(BooleanLiteral),
    StringLiteral(StringLiteral),
    DurationLiteral(DurationLiteral),
    FunctionCall(Box<FunctionCall>),
    Cast(Box<CastExpression>),
    Index(Box<IndexExpression>),
}

impl Expression {
    pub fn kind_name(&self) -> &'static str {
        use Expression::*;
        match self {
            Binary(..) => "BinaryExpression",
            Unary(..) => "UnaryExpression",
            Constant(..) => "Constant",
            Identifier(..) => "Identifier",
            IntegerLiteral(..) => "IntegerLiteral",
            RealLiteral(..) => "RealLiteral",
            BooleanLiteral(..) => "BooleanLiteral",
            StringLiteral(..) => "StringLiteral",
            DurationLiteral(..) => "DurationLiteral",
            FunctionCall(..) => "FunctionCall",
            Cast(..) => "Cast",
            Index(..) => "IndexExpression",
        }
    }

    pub fn span(&self) -> Option<&Span> {
        use Expression::*;
        match self {
            Binary(e) => e.span(),
            Unary(e) => e.span(),
            Constant(e) => e.span(),
            Identifier(e) => e.span(),
            IntegerLiteral(e) => e.span(),
            RealLiteral(e) => e.span(),
            BooleanLiteral(e) => e.span(),
            StringLiteral(e) => e.span(),
            DurationLiteral(e) => e.span(),
            FunctionCall(e) => e.span(),
            Cast(e) => e.span(),
            Index(e) => e.span(),
        }
    }

    /// Shorthand for an integer literal expression without a span.
    pub fn int(value: i128) -> Expression {
        IntegerLiteral::new(value).to_expr()
    }

    /// Shorthand for an identifier expression without a span.
    pub fn ident<T: ToString>(name: T) -> Expression {
        Identifier::new(name).to_expr()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpression {
    op: BinaryOperator,
    lhs: Expression,
    rhs: Expression,
    span: Option<Span>,
}

impl BinaryExpression {
    pub fn new(op: BinaryOperator, lhs: Expression, rhs: Expression) -> BinaryExpression {
        BinaryExpression {
            op,
            lhs,
            rhs,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> BinaryExpression {
        self.span = Some(span);
        self
    }

    pub fn op(&self) -> &BinaryOperator {
        &self.op
    }

    pub fn lhs(&self) -> &Expression {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expression {
        &self.rhs
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::Binary(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpression {
    op: UnaryOperator,
    expression: Expression,
    span: Option<Span>,
}

impl UnaryExpression {
    pub fn new(op: UnaryOperator, expression: Expression) -> UnaryExpression {
        UnaryExpression {
            op,
            expression,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> UnaryExpression {
        self.span = Some(span);
        self
    }

    pub fn op(&self) -> &UnaryOperator {
        &self.op
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::Unary(Box::new(self))
    }
}

/// A named constant such as `pi`. The name is kept as written in the source;
/// recognizing it is the evaluator's job, so that an unknown name can be
/// reported with its spelling.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    name: String,
    span: Option<Span>,
}

impl Constant {
    pub fn new<T: ToString>(name: T) -> Constant {
        Constant {
            name: name.to_string(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Constant {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::Constant(self)
    }
}

macro_rules! literal_node {
    ($name:ident, $typ:ty) => {
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            value: $typ,
            span: Option<Span>,
        }

        impl $name {
            pub fn new<T: Into<$typ>>(value: T) -> $name {
                $name {
                    value: value.into(),
                    span: None,
                }
            }

            pub fn with_span(mut self, span: Span) -> $name {
                self.span = Some(span);
                self
            }

            pub fn value(&self) -> &$typ {
                &self.value
            }

            pub fn span(&self) -> Option<&Span> {
                self.span.as_ref()
            }

            pub fn to_expr(self) -> Expression {
                Expression::$name(self)
            }
        }
    };
}

literal_node!(IntegerLiteral, i128);
literal_node!(RealLiteral, f64);
literal_node!(BooleanLiteral, bool);
literal_node!(StringLiteral, String);

#[derive(Clone, Debug, PartialEq)]
pub struct DurationLiteral {
    value: f64,
    unit: TimeUnit,
    span: Option<Span>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    NanoSecond,
    MicroSecond,
    MilliSecond,
    Second,
    Cycle,
}

impl DurationLiteral {
    pub fn new(value: f64, unit: TimeUnit) -> DurationLiteral {
        DurationLiteral {
            value,
            unit,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> DurationLiteral {
        self.span = Some(span);
        self
    }

    pub fn value(&self) -> &f64 {
        &self.value
    }

    pub fn unit(&self) -> &TimeUnit {
        &self.unit
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::DurationLiteral(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    name: Identifier,
    arguments: Vec<Expression>,
    span: Option<Span>,
}

impl FunctionCall {
    pub fn new(name: Identifier, arguments: Vec<Expression>) -> FunctionCall {
        FunctionCall {
            name,
            arguments,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> FunctionCall {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::FunctionCall(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CastExpression {
    typ: ClassicalType,
    arguments: Vec<Expression>,
    span: Option<Span>,
}

impl CastExpression {
    pub fn new(typ: ClassicalType, arguments: Vec<Expression>) -> CastExpression {
        CastExpression {
            typ,
            arguments,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> CastExpression {
        self.span = Some(span);
        self
    }

    pub fn get_type(&self) -> &ClassicalType {
        &self.typ
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::Cast(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpression {
    expression: Expression,
    index_expression: Expression,
    span: Option<Span>,
}

impl IndexExpression {
    pub fn new(expression: Expression, index_expression: Expression) -> IndexExpression {
        IndexExpression {
            expression,
            index_expression,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> IndexExpression {
        self.span = Some(span);
        self
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn index_expression(&self) -> &Expression {
        &self.index_expression
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_expr(self) -> Expression {
        Expression::Index(Box::new(self))
    }
}

//
// Operators
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    LogicAnd,
    LogicOr,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Gt => ">",
            Lt => "<",
            Ge => ">=",
            Le => "<=",
            Eq => "==",
            Ne => "!=",
            LogicAnd => "&&",
            LogicOr => "||",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            Shl => "<<",
            Shr => ">>",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    BitNot,
    Not,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::BitNot => "~",
            UnaryOperator::Not => "!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    ModAssign,
    PowAssign,
}

impl AssignmentOperator {
    pub fn symbol(&self) -> &'static str {
        use AssignmentOperator::*;
        match self {
            Assign => "=",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            DivAssign => "/=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            ModAssign => "%=",
            PowAssign => "**=",
        }
    }

    /// The binary operator applied by a compound assignment, `None` for `=`.
    pub fn binary_op(&self) -> Option<BinaryOperator> {
        use AssignmentOperator::*;
        match self {
            Assign => None,
            AddAssign => Some(BinaryOperator::Add),
            SubAssign => Some(BinaryOperator::Sub),
            MulAssign => Some(BinaryOperator::Mul),
            DivAssign => Some(BinaryOperator::Div),
            AndAssign => Some(BinaryOperator::BitAnd),
            OrAssign => Some(BinaryOperator::BitOr),
            XorAssign => Some(BinaryOperator::BitXor),
            ShlAssign => Some(BinaryOperator::Shl),
            ShrAssign => Some(BinaryOperator::Shr),
            ModAssign => Some(BinaryOperator::Mod),
            PowAssign => Some(BinaryOperator::Pow),
        }
    }
}

//
// Classical type designators
//

#[derive(Clone, Debug, PartialEq)]
pub enum ClassicalType {
    Int { designator: Option<Box<Expression>> },
    UInt { designator: Option<Box<Expression>> },
    Float { designator: Option<Box<Expression>> },
    Angle { designator: Option<Box<Expression>> },
    Bit { designator: Option<Box<Expression>> },
    Bool,
    Duration,
    Stretch,
    Complex(Box<ClassicalType>),
}

impl ClassicalType {
    pub fn int(designator: Option<Expression>) -> ClassicalType {
        ClassicalType::Int {
            designator: designator.map(Box::new),
        }
    }

    pub fn uint(designator: Option<Expression>) -> ClassicalType {
        ClassicalType::UInt {
            designator: designator.map(Box::new),
        }
    }

    pub fn float(designator: Option<Expression>) -> ClassicalType {
        ClassicalType::Float {
            designator: designator.map(Box::new),
        }
    }

    pub fn angle(designator: Option<Expression>) -> ClassicalType {
        ClassicalType::Angle {
            designator: designator.map(Box::new),
        }
    }

    pub fn bit(designator: Option<Expression>) -> ClassicalType {
        ClassicalType::Bit {
            designator: designator.map(Box::new),
        }
    }

    pub fn designator(&self) -> Option<&Expression> {
        use ClassicalType::*;
        match self {
            Int { designator }
            | UInt { designator }
            | Float { designator }
            | Angle { designator }
            | Bit { designator } => designator.as_deref(),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        use ClassicalType::*;
        match self {
            Int { .. } => "int",
            UInt { .. } => "uint",
            Float { .. } => "float",
            Angle { .. } => "angle",
            Bit { .. } => "bit",
            Bool => "bool",
            Duration => "duration",
            Stretch => "stretch",
            Complex(..) => "complex",
        }
    }
}

//
// References to (possibly indexed) quantum or classical resources
//

#[derive(Clone, Debug, PartialEq)]
pub enum IndexIdentifier {
    Identifier(Identifier),
    Subscript(Box<Subscript>),
    Selection(Box<Selection>),
    Slice(Box<Slice>),
    Concatenation(Box<Concatenation>),
}

impl IndexIdentifier {
    /// A bare, unindexed reference.
    pub fn plain<T: ToString>(name: T) -> IndexIdentifier {
        IndexIdentifier::Identifier(Identifier::new(name))
    }

    pub fn kind_name(&self) -> &'static str {
        use IndexIdentifier::*;
        match self {
            Identifier(..) => "Identifier",
            Subscript(..) => "Subscript",
            Selection(..) => "Selection",
            Slice(..) => "Slice",
            Concatenation(..) => "Concatenation",
        }
    }

    pub fn span(&self) -> Option<&Span> {
        use IndexIdentifier::*;
        match self {
            Identifier(id) => id.span(),
            Subscript(sub) => sub.span(),
            Selection(sel) => sel.span(),
            Slice(slice) => slice.span(),
            Concatenation(concat) => concat.span(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subscript {
    name: Identifier,
    index: Expression,
    span: Option<Span>,
}

impl Subscript {
    pub fn new(name: Identifier, index: Expression) -> Subscript {
        Subscript {
            name,
            index,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Subscript {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn index(&self) -> &Expression {
        &self.index
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_index_identifier(self) -> IndexIdentifier {
        IndexIdentifier::Subscript(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    name: Identifier,
    indices: Vec<Expression>,
    span: Option<Span>,
}

impl Selection {
    pub fn new(name: Identifier, indices: Vec<Expression>) -> Selection {
        Selection {
            name,
            indices,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Selection {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn indices(&self) -> &[Expression] {
        &self.indices
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_index_identifier(self) -> IndexIdentifier {
        IndexIdentifier::Selection(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    name: Identifier,
    range: RangeDefinition,
    span: Option<Span>,
}

impl Slice {
    pub fn new(name: Identifier, range: RangeDefinition) -> Slice {
        Slice {
            name,
            range,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Slice {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn range(&self) -> &RangeDefinition {
        &self.range
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_index_identifier(self) -> IndexIdentifier {
        IndexIdentifier::Slice(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Concatenation {
    lhs: IndexIdentifier,
    rhs: IndexIdentifier,
    span: Option<Span>,
}

impl Concatenation {
    pub fn new(lhs: IndexIdentifier, rhs: IndexIdentifier) -> Concatenation {
        Concatenation {
            lhs,
            rhs,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Concatenation {
        self.span = Some(span);
        self
    }

    pub fn lhs(&self) -> &IndexIdentifier {
        &self.lhs
    }

    pub fn rhs(&self) -> &IndexIdentifier {
        &self.rhs
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_index_identifier(self) -> IndexIdentifier {
        IndexIdentifier::Concatenation(Box::new(self))
    }
}

/// `[start : (step :) end]`. All three parts are optional at the syntax
/// level; which of them are required depends on where the range is used.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeDefinition {
    start: Option<Expression>,
    end: Option<Expression>,
    step: Option<Expression>,
    span: Option<Span>,
}

impl RangeDefinition {
    pub fn new(
        start: Option<Expression>,
        end: Option<Expression>,
        step: Option<Expression>,
    ) -> RangeDefinition {
        RangeDefinition {
            start,
            end,
            step,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> RangeDefinition {
        self.span = Some(span);
        self
    }

    pub fn start(&self) -> Option<&Expression> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Expression> {
        self.end.as_ref()
    }

    pub fn step(&self) -> Option<&Expression> {
        self.step.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }
}

//
// Statements
//

#[derive(Clone, Debug, PartialEq)]
pub struct QubitDeclaration {
    qubit: Identifier,
    designator: Option<Expression>,
    span: Option<Span>,
}

impl QubitDeclaration {
    pub fn new<T: ToString>(name: T, designator: Option<Expression>) -> QubitDeclaration {
        QubitDeclaration {
            qubit: Identifier::new(name),
            designator,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> QubitDeclaration {
        self.span = Some(span);
        self
    }

    pub fn qubit(&self) -> &Identifier {
        &self.qubit
    }

    pub fn designator(&self) -> Option<&Expression> {
        self.designator.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::QubitDeclaration(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassicalDeclaration {
    typ: ClassicalType,
    identifier: Identifier,
    init_expression: Option<Expression>,
    span: Option<Span>,
}

impl ClassicalDeclaration {
    pub fn new<T: ToString>(
        typ: ClassicalType,
        name: T,
        init_expression: Option<Expression>,
    ) -> ClassicalDeclaration {
        ClassicalDeclaration {
            typ,
            identifier: Identifier::new(name),
            init_expression,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> ClassicalDeclaration {
        self.span = Some(span);
        self
    }

    pub fn get_type(&self) -> &ClassicalType {
        &self.typ
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn init_expression(&self) -> Option<&Expression> {
        self.init_expression.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::ClassicalDeclaration(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstantDeclaration {
    identifier: Identifier,
    init_expression: Option<Expression>,
    span: Option<Span>,
}

impl ConstantDeclaration {
    pub fn new<T: ToString>(name: T, init_expression: Option<Expression>) -> ConstantDeclaration {
        ConstantDeclaration {
            identifier: Identifier::new(name),
            init_expression,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> ConstantDeclaration {
        self.span = Some(span);
        self
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn init_expression(&self) -> Option<&Expression> {
        self.init_expression.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::ConstantDeclaration(Box::new(self))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IOIdentifierName {
    Input,
    Output,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IODeclaration {
    io_identifier: IOIdentifierName,
    typ: ClassicalType,
    identifier: Identifier,
    init_expression: Option<Expression>,
    span: Option<Span>,
}

impl IODeclaration {
    pub fn new<T: ToString>(
        io_identifier: IOIdentifierName,
        typ: ClassicalType,
        name: T,
        init_expression: Option<Expression>,
    ) -> IODeclaration {
        IODeclaration {
            io_identifier,
            typ,
            identifier: Identifier::new(name),
            init_expression,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> IODeclaration {
        self.span = Some(span);
        self
    }

    pub fn io_identifier(&self) -> &IOIdentifierName {
        &self.io_identifier
    }

    pub fn get_type(&self) -> &ClassicalType {
        &self.typ
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn init_expression(&self) -> Option<&Expression> {
        self.init_expression.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::IODeclaration(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassicalAssignment {
    lvalue: IndexIdentifier,
    op: AssignmentOperator,
    rvalue: Expression,
    span: Option<Span>,
}

impl ClassicalAssignment {
    pub fn new(
        lvalue: IndexIdentifier,
        op: AssignmentOperator,
        rvalue: Expression,
    ) -> ClassicalAssignment {
        ClassicalAssignment {
            lvalue,
            op,
            rvalue,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> ClassicalAssignment {
        self.span = Some(span);
        self
    }

    pub fn lvalue(&self) -> &IndexIdentifier {
        &self.lvalue
    }

    pub fn op(&self) -> &AssignmentOperator {
        &self.op
    }

    pub fn rvalue(&self) -> &Expression {
        &self.rvalue
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::ClassicalAssignment(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AliasStatement {
    target: Identifier,
    value: IndexIdentifier,
    span: Option<Span>,
}

impl AliasStatement {
    pub fn new(target: Identifier, value: IndexIdentifier) -> AliasStatement {
        AliasStatement {
            target,
            value,
            span: None,
        }
    }

    pub fn target(&self) -> &Identifier {
        &self.target
    }

    pub fn value(&self) -> &IndexIdentifier {
        &self.value
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Alias(Box::new(self))
    }
}

/// Classical formal parameter of a gate or subroutine definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassicalArgument {
    typ: ClassicalType,
    name: String,
}

impl ClassicalArgument {
    pub fn new<T: ToString>(typ: ClassicalType, name: T) -> ClassicalArgument {
        ClassicalArgument {
            typ,
            name: name.to_string(),
        }
    }

    pub fn get_type(&self) -> &ClassicalType {
        &self.typ
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumGateDefinition {
    name: Identifier,
    arguments: Vec<ClassicalArgument>,
    qubits: Vec<Identifier>,
    body: Vec<Statement>,
    span: Option<Span>,
}

impl QuantumGateDefinition {
    pub fn new(
        name: Identifier,
        arguments: Vec<ClassicalArgument>,
        qubits: Vec<Identifier>,
        body: Vec<Statement>,
    ) -> QuantumGateDefinition {
        QuantumGateDefinition {
            name,
            arguments,
            qubits,
            body,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> QuantumGateDefinition {
        self.span = Some(span);
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn arguments(&self) -> &[ClassicalArgument] {
        &self.arguments
    }

    pub fn qubits(&self) -> &[Identifier] {
        &self.qubits
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::GateDefinition(Box::new(self))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateModifierName {
    Inv,
    Pow,
    Ctrl,
    NegCtrl,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumGateModifier {
    modifier: GateModifierName,
    argument: Option<Expression>,
    span: Option<Span>,
}

impl QuantumGateModifier {
    pub fn new(modifier: GateModifierName, argument: Option<Expression>) -> QuantumGateModifier {
        QuantumGateModifier {
            modifier,
            argument,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> QuantumGateModifier {
        self.span = Some(span);
        self
    }

    pub fn modifier(&self) -> &GateModifierName {
        &self.modifier
    }

    pub fn argument(&self) -> Option<&Expression> {
        self.argument.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumGate {
    modifiers: Vec<QuantumGateModifier>,
    name: Identifier,
    arguments: Vec<Expression>,
    qubits: Vec<IndexIdentifier>,
    span: Option<Span>,
}

impl QuantumGate {
    pub fn new<T: ToString>(
        name: T,
        arguments: Vec<Expression>,
        qubits: Vec<IndexIdentifier>,
        modifiers: Vec<QuantumGateModifier>,
    ) -> QuantumGate {
        QuantumGate {
            modifiers,
            name: Identifier::new(name),
            arguments,
            qubits,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> QuantumGate {
        self.span = Some(span);
        self
    }

    pub fn modifiers(&self) -> &[QuantumGateModifier] {
        &self.modifiers
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn qubits(&self) -> &[IndexIdentifier] {
        &self.qubits
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::GateCall(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumPhase {
    modifiers: Vec<QuantumGateModifier>,
    argument: Expression,
    qubits: Vec<IndexIdentifier>,
    span: Option<Span>,
}

impl QuantumPhase {
    pub fn new(
        argument: Expression,
        qubits: Vec<IndexIdentifier>,
        modifiers: Vec<QuantumGateModifier>,
    ) -> QuantumPhase {
        QuantumPhase {
            modifiers,
            argument,
            qubits,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> QuantumPhase {
        self.span = Some(span);
        self
    }

    pub fn modifiers(&self) -> &[QuantumGateModifier] {
        &self.modifiers
    }

    pub fn argument(&self) -> &Expression {
        &self.argument
    }

    pub fn qubits(&self) -> &[IndexIdentifier] {
        &self.qubits
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Phase(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumMeasurement {
    qubit: IndexIdentifier,
    span: Option<Span>,
}

impl QuantumMeasurement {
    pub fn new(qubit: IndexIdentifier) -> QuantumMeasurement {
        QuantumMeasurement { qubit, span: None }
    }

    pub fn with_span(mut self, span: Span) -> QuantumMeasurement {
        self.span = Some(span);
        self
    }

    pub fn qubit(&self) -> &IndexIdentifier {
        &self.qubit
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumMeasurementAssignment {
    lhs: IndexIdentifier,
    measure_instruction: QuantumMeasurement,
    span: Option<Span>,
}

impl QuantumMeasurementAssignment {
    pub fn new(
        lhs: IndexIdentifier,
        measure_instruction: QuantumMeasurement,
    ) -> QuantumMeasurementAssignment {
        QuantumMeasurementAssignment {
            lhs,
            measure_instruction,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> QuantumMeasurementAssignment {
        self.span = Some(span);
        self
    }

    pub fn lhs(&self) -> &IndexIdentifier {
        &self.lhs
    }

    pub fn measure_instruction(&self) -> &QuantumMeasurement {
        &self.measure_instruction
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::MeasurementAssignment(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumReset {
    qubits: Vec<IndexIdentifier>,
    span: Option<Span>,
}

impl QuantumReset {
    pub fn new(qubits: Vec<IndexIdentifier>) -> QuantumReset {
        QuantumReset { qubits, span: None }
    }

    pub fn with_span(mut self, span: Span) -> QuantumReset {
        self.span = Some(span);
        self
    }

    pub fn qubits(&self) -> &[IndexIdentifier] {
        &self.qubits
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Reset(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumBarrier {
    qubits: Vec<IndexIdentifier>,
    span: Option<Span>,
}

impl QuantumBarrier {
    pub fn new(qubits: Vec<IndexIdentifier>) -> QuantumBarrier {
        QuantumBarrier { qubits, span: None }
    }

    pub fn with_span(mut self, span: Span) -> QuantumBarrier {
        self.span = Some(span);
        self
    }

    pub fn qubits(&self) -> &[IndexIdentifier] {
        &self.qubits
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Barrier(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BranchingStatement {
    condition: Expression,
    if_block: Vec<Statement>,
    else_block: Option<Vec<Statement>>,
    span: Option<Span>,
}

impl BranchingStatement {
    pub fn new(
        condition: Expression,
        if_block: Vec<Statement>,
        else_block: Option<Vec<Statement>>,
    ) -> BranchingStatement {
        BranchingStatement {
            condition,
            if_block,
            else_block,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> BranchingStatement {
        self.span = Some(span);
        self
    }

    pub fn condition(&self) -> &Expression {
        &self.condition
    }

    pub fn if_block(&self) -> &[Statement] {
        &self.if_block
    }

    pub fn else_block(&self) -> Option<&[Statement]> {
        self.else_block.as_deref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Branch(Box::new(self))
    }
}

/// Iterable of a `for ... in` loop.
#[derive(Clone, Debug, PartialEq)]
pub enum SetDeclaration {
    Range(RangeDefinition),
    List(Vec<Expression>),
    Identifier(Identifier),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForInLoop {
    loop_variable: Identifier,
    set_declaration: SetDeclaration,
    block: Vec<Statement>,
    span: Option<Span>,
}

impl ForInLoop {
    pub fn new(
        loop_variable: Identifier,
        set_declaration: SetDeclaration,
        block: Vec<Statement>,
    ) -> ForInLoop {
        ForInLoop {
            loop_variable,
            set_declaration,
            block,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> ForInLoop {
        self.span = Some(span);
        self
    }

    pub fn loop_variable(&self) -> &Identifier {
        &self.loop_variable
    }

    pub fn set_declaration(&self) -> &SetDeclaration {
        &self.set_declaration
    }

    pub fn block(&self) -> &[Statement] {
        &self.block
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::ForIn(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileLoop {
    while_condition: Expression,
    block: Vec<Statement>,
    span: Option<Span>,
}

impl WhileLoop {
    pub fn new(while_condition: Expression, block: Vec<Statement>) -> WhileLoop {
        WhileLoop {
            while_condition,
            block,
            span: None,
        }
    }

    pub fn while_condition(&self) -> &Expression {
        &self.while_condition
    }

    pub fn block(&self) -> &[Statement] {
        &self.block
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::While(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    expression: Option<Expression>,
    span: Option<Span>,
}

impl ReturnStatement {
    pub fn new(expression: Option<Expression>) -> ReturnStatement {
        ReturnStatement {
            expression,
            span: None,
        }
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Return(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubroutineDefinition {
    name: Identifier,
    arguments: Vec<ClassicalArgument>,
    return_type: Option<ClassicalType>,
    body: Vec<Statement>,
    span: Option<Span>,
}

impl SubroutineDefinition {
    pub fn new(
        name: Identifier,
        arguments: Vec<ClassicalArgument>,
        return_type: Option<ClassicalType>,
        body: Vec<Statement>,
    ) -> SubroutineDefinition {
        SubroutineDefinition {
            name,
            arguments,
            return_type,
            body,
            span: None,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn arguments(&self) -> &[ClassicalArgument] {
        &self.arguments
    }

    pub fn return_type(&self) -> Option<&ClassicalType> {
        self.return_type.as_ref()
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::SubroutineDefinition(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExternDeclaration {
    name: Identifier,
    span: Option<Span>,
}

impl ExternDeclaration {
    pub fn new(name: Identifier) -> ExternDeclaration {
        ExternDeclaration { name, span: None }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Extern(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DelayInstruction {
    duration: Expression,
    qubits: Vec<IndexIdentifier>,
    span: Option<Span>,
}

impl DelayInstruction {
    pub fn new(duration: Expression, qubits: Vec<IndexIdentifier>) -> DelayInstruction {
        DelayInstruction {
            duration,
            qubits,
            span: None,
        }
    }

    pub fn duration(&self) -> &Expression {
        &self.duration
    }

    pub fn qubits(&self) -> &[IndexIdentifier] {
        &self.qubits
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Delay(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxStatement {
    duration: Option<Expression>,
    body: Vec<Statement>,
    span: Option<Span>,
}

impl BoxStatement {
    pub fn new(duration: Option<Expression>, body: Vec<Statement>) -> BoxStatement {
        BoxStatement {
            duration,
            body,
            span: None,
        }
    }

    pub fn duration(&self) -> Option<&Expression> {
        self.duration.as_ref()
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Box(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationGrammarDeclaration {
    calibration_grammar: String,
    span: Option<Span>,
}

impl CalibrationGrammarDeclaration {
    pub fn new<T: ToString>(calibration_grammar: T) -> CalibrationGrammarDeclaration {
        CalibrationGrammarDeclaration {
            calibration_grammar: calibration_grammar.to_string(),
            span: None,
        }
    }

    pub fn calibration_grammar(&self) -> &str {
        &self.calibration_grammar
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::CalibrationGrammar(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationDefinition {
    name: Identifier,
    qubits: Vec<String>,
    body: String,
    span: Option<Span>,
}

impl CalibrationDefinition {
    pub fn new(name: Identifier, qubits: Vec<String>, body: String) -> CalibrationDefinition {
        CalibrationDefinition {
            name,
            qubits,
            body,
            span: None,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn qubits(&self) -> &[String] {
        &self.qubits
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::CalibrationDefinition(Box::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Include {
    file_path: String,
    span: Option<Span>,
}

impl Include {
    pub fn new<T: ToString>(file_path: T) -> Include {
        Include {
            file_path: file_path.to_string(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Include {
        self.span = Some(span);
        self
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Include(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pragma {
    pragma_text: String,
    span: Option<Span>,
}

impl Pragma {
    pub fn new<T: ToString>(pragma_text: T) -> Pragma {
        Pragma {
            pragma_text: pragma_text.to_string(),
            span: None,
        }
    }

    /// The pragma line without the leading `pragma` / `#pragma` directive.
    pub fn pragma_text(&self) -> &str {
        &self.pragma_text
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn to_stmt(self) -> Statement {
        Statement::Pragma(self)
    }
}
