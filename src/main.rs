fn main() {
    knightfall::uci::run_uci_loop();
}
