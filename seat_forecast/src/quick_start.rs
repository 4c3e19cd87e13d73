/*!

# Quick start

This example runs one forecast cycle end to end from a snapshot of live
results. Any process that can produce a two-column CSV works as the data
source; here we write one by hand.

**Capturing a snapshot** Save the currently leading or won seats per party
in a file called `results.csv`:

```text
Party,Projected Seats
LPC,30
CPC,10
```

Party codes must belong to the configured party set (the default set covers
the six federal parties: LPC, CPC, NDP, BQ, GPC, PPC). Parties without seats
yet can simply be left out.

**Running a forecast** Run `seatcast` against the snapshot:

```bash
seatcast -i results.csv --seed 42
```

The program blends the snapshot with the pre-election baseline, simulates a
batch of outcomes around the blended projection and prints a JSON summary:

```text
{
  "needle": "firstMajority",
  "odds": {
    "CPC": { "majority": 0.0, "minority": 0.026 },
    "LPC": { "majority": 0.994, "minority": 0.006 },
    "NDP": { "officialStatus": 0.155 }
  },
  "projectedWinner": { "majority": true, "party": "LPC", "seats": 194 },
  ...
}
```

The `--seed` flag makes the run reproducible. Without it every run draws a
fresh batch, and the reported odds wobble within sampling error.

**Refreshing** The program is stateless: simply run it again whenever the
data source produces a newer snapshot. Scheduling (cron, a shell loop, a
dashboard timer) stays outside the program.

You can explore the following sections next:
- the [configuration section](../manual/index.html#configuration) describes
  how to override the party set, the baseline and every threshold with the
  `--config` flag;
- the input documentation in the same manual covers the accepted snapshot
  formats.

*/
