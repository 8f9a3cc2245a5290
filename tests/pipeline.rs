mod common;

use armc::codegen::Instruction;
use common::{compile, has_unique_labels, labels, run_main, Machine};

#[test]
fn arithmetic_precedence() {
    assert_eq!(7, run_main("function main() { return 1 + 2 * 3; }"));
    assert_eq!(9, run_main("function main() { return (1 + 2) * 3; }"));
    assert_eq!(3, run_main("function main() { return 10 - 4 - 3; }"));
    assert_eq!(2, run_main("function main() { return 20 / 5 / 2; }"));
}

#[test]
fn unsigned_arithmetic() {
    assert_eq!(u32::MAX, run_main("function main() { return 1 - 2; }"));
    assert_eq!(u32::MAX, run_main("function main() { return 4294967295; }"));
    assert_eq!(3, run_main("function main() { return 7 / 2; }"));
}

#[test]
fn equality_and_not() {
    assert_eq!(1, run_main("function main() { return 3 == 3; }"));
    assert_eq!(0, run_main("function main() { return 3 != 3; }"));
    assert_eq!(1, run_main("function main() { return !0 + !7; }"));
    assert_eq!(1, run_main("function main() { return !!5; }"));
}

#[test]
fn recursive_factorial() {
    let source = "
        function factorial(n) {
            if (n == 0) {
                return 1;
            } else {
                return n * factorial(n - 1);
            }
        }

        function main() {
            return factorial(5);
        }
    ";
    let program = compile(source);
    let mut machine = Machine::new(&program).unwrap();
    assert_eq!(120, machine.call("main", &[]).unwrap());
    assert_eq!(7, machine.max_depth);
    assert_eq!(720, machine.call("factorial", &[6]).unwrap());
}

#[test]
fn arguments_keep_their_order() {
    let source = "
        function pair(a, b) { return a - b; }
        function triple(a, b, c) { return a * 100 + b * 10 + c; }
        function quad(a, b, c, d) { return a - b - c - d; }
        function main() { return pair(9, 2) + triple(1, 2, 3) + quad(100, 1, 2, 3); }
    ";
    assert_eq!(7 + 123 + 94, run_main(source));
}

#[test]
fn nested_calls_as_arguments() {
    let source = "
        function add(a, b) { return a + b; }
        function main() { return add(add(1, 2), add(3, add(4, 5))); }
    ";
    assert_eq!(15, run_main(source));
}

#[test]
fn if_else_branches() {
    let source = "
        function pick(flag) {
            if (flag) { return 10; } else { return 20; }
        }
        function main() { return pick(0) + pick(1) * 2; }
    ";
    assert_eq!(40, run_main(source));
}

#[test]
fn if_without_else() {
    let source = "
        function clamp(x) {
            if (x == 0) x = 1;
            return x;
        }
        function main() { return clamp(0) + clamp(5); }
    ";
    assert_eq!(6, run_main(source));
}

#[test]
fn while_loop_with_locals() {
    let source = "
        function main() {
            var i = 0;
            var sum = 0;
            while (i != 5) {
                i = i + 1;
                sum = sum + i;
            }
            return sum;
        }
    ";
    assert_eq!(15, run_main(source));
}

#[test]
fn locals_and_parameters_coexist() {
    let source = "
        function mix(a, b) {
            var x = a * 2;
            var y = x + b;
            b = y * 10;
            return b + x;
        }
        function main() { return mix(3, 4); }
    ";
    assert_eq!(106, run_main(source));
}

#[test]
fn var_slots_are_fixed_at_compile_time() {
    // later iterations push below the slot `t` was bound to, so it keeps the first value
    let in_loop = "
        function main() {
            var i = 0;
            var s = 0;
            while (i != 3) {
                var t = i + 1;
                s = s + t;
                i = i + 1;
            }
            return s;
        }
    ";
    assert_eq!(3, run_main(in_loop));

    // `b` is bound below `a`'s slot, but at run time it is pushed into that slot
    let after_skipped = "
        function main() {
            if (0) { var a = 1; }
            var b = 2;
            return b;
        }
    ";
    assert_eq!(0, run_main(after_skipped));
}

#[test]
fn falling_off_the_end_returns_zero() {
    assert_eq!(0, run_main("function main() { 5; }"));
    assert_eq!(0, run_main("function main() { }"));
}

#[test]
fn labels_are_unique() {
    let source = "
        function a(x) { while (x) { x = x - 1; } if (x) { return 1; } }
        function b(x) { if (x) { if (x == 2) { return 2; } } else { while (1) { } } }
        function main() { return a(3) + b(2); }
    ";
    let program = compile(source);
    assert!(has_unique_labels(&program));
    let local: Vec<_> = labels(&program)
        .into_iter()
        .filter(|l| l.starts_with(".L"))
        .collect();
    assert_eq!(10, local.len());
    assert_eq!(2, run_main(source));
}

#[test]
fn expression_code_is_stack_neutral() {
    let source = "
        function f(a, b, c) { return a + b + c; }
        1 + f(1, 2, 3) * (4 - f(5, 6, 7)) + !(2 == 3);
    ";
    let program = compile(source);
    let start = program
        .instructions
        .iter()
        .rposition(|i| matches!(i, Instruction::Pop(regs) if regs.contains(&armc::codegen::Register::Pc)))
        .unwrap()
        + 1;
    let growth: i32 = program.instructions[start..]
        .iter()
        .map(Instruction::stack_growth)
        .sum();
    assert_eq!(0, growth);
}

#[test]
fn emitted_text_shape() {
    let program = compile("function main() { return 0; }");
    let text = program.to_string();
    assert!(text.starts_with("\n.global main\nmain:\npush {fp, lr}\n"));
    assert!(text.ends_with("mov sp, fp\nmov r0, #0\npop {fp, pc}\n"));
    assert!(text.lines().all(|line| !line.starts_with(char::is_whitespace)));
}
