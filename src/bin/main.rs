fn main() {
    foundry::main();
}
