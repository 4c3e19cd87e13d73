/*!

This is the long-form manual for `seat_forecast` and `seatcast`.

## Input formats

The live snapshot passed with `--input` is read in one of two formats,
selected with `--input-type` or guessed from the file extension:

### `csv`

A two-column file, `party code, seat count`, as written by typical results
scrapers:

```text
Party,Projected Seats
LPC,30
CPC,10
```

A header row is tolerated (any first row whose second column is not a
number is skipped). Rows repeating a party code accumulate.

### `json`

A single JSON object mapping party codes to seat counts:

```text
{ "LPC": 30, "CPC": 10 }
```

With no `--input` at all, the program falls back to the baseline-only
projection (the degenerate blend with nothing reported).

## Configuration

`seatcast` comes with a complete default configuration (the 338-seat
legislature with the six federal parties) and accepts a JSON file with the
`--config` flag to override any part of it:

```text
{
  "outputSettings": {
    "contestName": "Canadian Federal Election 2025",
    "contestDate": "2025-04-28"
  },
  "parties": [
    { "code": "LPC", "name": "Liberal" },
    { "code": "CPC", "name": "Conservative" }
  ],
  "baseline": { "LPC": 186, "CPC": 124 },
  "rules": {
    "totalSeats": 338,
    "majorityThreshold": 172,
    "minorPartyThreshold": 12,
    "trialCount": 1000,
    "uncertaintyFloor": 0.2,
    "randomSeed": "42",
    "primaryParties": ["LPC", "CPC"],
    "minorParty": "NDP"
  }
}
```

Notes on the individual fields:

- every top-level section is optional; omitted sections keep their default
  values. Defaults: parties LPC/CPC/NDP/BQ/GPC/PPC, baseline
  `{LPC: 186, CPC: 124, BQ: 23, NDP: 9, GPC: 1, PPC: 0}`, 338 seats,
  majority 172, official status 12, 1000 trials, floor 0.2, primaries
  (LPC, CPC), minor party NDP.
- the numeric thresholds accept either a JSON number or a numeric string.
- `randomSeed` (string, optional): seeds the trial generator for
  reproducible runs; the `--seed` flag overrides it. With neither, the
  generator is seeded from operating-system entropy.
- `primaryParties` must name exactly two declared parties, in order; the
  first one is reported first in the odds.
- the `baseline` does not need to sum to `totalSeats`.
- declaration order of `parties` is the output order of the projection
  table and the draw order of the simulator.

## Summary output

The summary written to `--out` (or standard output) is a single JSON
document: the echoed contest settings, the live tally, the blended
projection sorted by seats, the projected winner, the needle band, the
outcome odds and the per-party seat spread. A stored summary can be passed
back with `--reference` to check that a run reproduces it exactly; any
difference is printed as a diff and fails the run.

*/
