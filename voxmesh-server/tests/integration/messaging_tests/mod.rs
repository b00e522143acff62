mod test_signal_forwarded_verbatim;
mod test_stale_signal_dropped;
