//! Common script fixtures for tests.

/// A small two-phase model exercising callbacks, loops, constants and a
/// user-defined function.
pub const NEUTRAL_MODEL: &str = "initialize() {
\tdefineConstant(\"N\", 500);
\tinitializeMutationRate(1e-7);
\tinitializeMutationType(\"m1\", 0.5, \"f\", 0.0);
\tinitializeRecombinationRate(1e-8);
}
1 early() {
\tsim.addSubpop(\"p1\", N);
}
s2 10:20 late() {
\tsubs = sim.subpopulations();
\ttotal = 0;
\tfor (s in subs) {
\t\tn = s.size;
\t\ttotal = total + n;
\t}
\tmean_size = total / 2;
}
fitness(m1, p1) {
\tscale = 0.5;
\treturn scale;
}
function (float)half([float x = 1.0]) {
\treturn x / 2;
}
";

pub const FUNCTION_THEN_CALL: &str = "function foo(x, y) { return x + y; }
z = foo(1,2);
";

pub const UNTERMINATED_BLOCK: &str = "1 early() {
\tx = 1;
\tif (x == 1) {
\t\ty = 2;
";

pub const LITERALS: &str = "a = 42;
b = 3.14;
c = \"hello\";
d = T;
e = c(1, 2, 3);
f = c(1, 2.5);
g = NULL;
h = 1:10;
i = matrix(c(1.5, 2.5), nrow=1);
j = list(1, \"x\");
k = a * 2;
";
