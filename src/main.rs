fn main() {
    reqgather::run_cli();
}
